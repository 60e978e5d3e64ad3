use roiscope::configuration::{self, ScenarioSet, Settings};
use roiscope::core_types::{CampaignRecord, Grade, InvestmentPosition};
use roiscope::metrics::{evaluate_position, BreakEven, DigitalAdsPlan};
use roiscope::scenarios::Knob;
use roiscope::{Report, ReportKind, RoiError, Roiscope};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::PathBuf;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn sample_settings_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("roiscope.toml")
}

fn record(id: &str, name: &str, investment: Decimal, revenue: Decimal, customers: u64) -> CampaignRecord {
    CampaignRecord::builder(id, name)
        .dates(
            chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
        )
        .investment(investment)
        .revenue(revenue)
        .new_customers(customers)
        .impressions(250000)
        .engagements(12500)
        .clicks(5000)
        .conversions(300)
        .build()
        .unwrap()
}

fn portfolio() -> Vec<CampaignRecord> {
    vec![
        record("C001", "Spring Launch", dec!(10000), dec!(25000), 150),
        record("C002", "Summer Clearance", dec!(5000), dec!(4000), 40),
        record("C003", "Holiday Push", dec!(8000), dec!(32000), 200),
    ]
}

fn parse(value: Option<&str>) -> Decimal {
    value.unwrap().parse().unwrap()
}

#[test]
fn sample_settings_build_the_toolkit() {
    init_tracing();
    let toolkit = Roiscope::load(sample_settings_path()).unwrap();
    assert_eq!(toolkit.calculator().grader().bands().len(), 8);
    assert_eq!(toolkit.engine().benchmarks().platforms.len(), 3);
    assert_eq!(toolkit.configured_scenarios().scenarios.len(), 3);
}

#[test]
fn metrics_are_graded_and_break_even_is_reported() {
    let toolkit = Roiscope::load(sample_settings_path()).unwrap();
    let result = toolkit.compute_metrics(&portfolio()[0]);

    assert_eq!(result.roi(), Some(dec!(150)));
    assert_eq!(result.grade, Some(Grade::BMinus));
    assert_eq!(result.break_even, BreakEven::Customers(60));
    assert!(result.data_complete);
}

#[test]
fn comparison_over_a_portfolio() {
    let toolkit = Roiscope::default();
    let comparison = toolkit.compare(&portfolio()).unwrap();

    assert_eq!(comparison.record_count, 3);
    let roi = &comparison.extrema["roi"];
    assert_eq!(roi.highest.record_id.as_str(), "C003");
    assert_eq!(roi.highest.value, dec!(300));
    assert_eq!(roi.lowest.record_id.as_str(), "C002");
    assert_eq!(roi.lowest.value, dec!(-20));

    assert_eq!(comparison.totals.investment, dec!(23000));
    assert_eq!(comparison.totals.revenue, dec!(61000));
    assert_eq!(comparison.totals.profit, dec!(38000));
    assert_eq!(comparison.totals.new_customers, 390);

    // A loss-making campaign is always critical on ROI.
    assert!(comparison.critical().any(|r| r.record_id.as_str() == "C002"));
}

#[test]
fn comparison_exports_as_rows() {
    let toolkit = Roiscope::default();
    let comparison = toolkit.compare(&portfolio()).unwrap();
    let exported = toolkit.export_report(Report::Comparison(&comparison)).unwrap();

    assert_eq!(exported.kind, ReportKind::Comparison);
    assert_eq!(exported.get("record_count"), Some("3"));
    assert_eq!(exported.get("extrema.roi.highest.record_id"), Some("C003"));
    assert_eq!(parse(exported.get("totals.investment")), dec!(23000));
    assert_eq!(exported.get("recommendations.0.record_id"), Some("C001"));
}

#[test]
fn configured_scenarios_run_in_declaration_order() {
    let toolkit = Roiscope::load(sample_settings_path()).unwrap();
    let results = toolkit.run_configured_scenarios().unwrap();

    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["conservative", "moderate", "optimistic"]);

    let (conservative, moderate, optimistic) = (&results[0], &results[1], &results[2]);
    assert_eq!(moderate.monthly.total_revenue, dec!(34000));
    assert_eq!(optimistic.monthly.total_revenue, dec!(54000));
    assert!(conservative.monthly.total_revenue < moderate.monthly.total_revenue);

    let exported = toolkit.export_report(Report::Scenarios(&results)).unwrap();
    assert_eq!(exported.get("1.name"), Some("moderate"));
    assert_eq!(parse(exported.get("1.monthly.total_revenue")), dec!(34000));
    assert_eq!(exported.get("2.assumptions.tiers.2.name"), Some("Gold"));
}

#[test]
fn explicit_scenario_sets_run_without_settings() {
    let toolkit = Roiscope::default();
    let results = toolkit.run_scenarios(&ScenarioSet::best_base_worst()).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[1].name, "base");
}

#[test]
fn sensitivity_and_side_reports_export() {
    let toolkit = Roiscope::default();
    let points = toolkit
        .engine()
        .sensitivity(
            &configuration::AssumptionSet::default(),
            Knob::AvgMonthlyAdViews,
            &[dec!(6), dec!(12), dec!(20)],
        )
        .unwrap();
    let exported = toolkit.export_report(Report::Sensitivity(&points)).unwrap();
    assert_eq!(parse(exported.get("1.total_revenue")), dec!(34000));

    let investor = evaluate_position(&InvestmentPosition {
        initial_investment: dec!(100000),
        current_value: dec!(150000),
        period_years: dec!(2),
    });
    let exported = toolkit.export_report(Report::Investor(&investor)).unwrap();
    assert_eq!(parse(exported.get("roi_pct")), dec!(50));

    let projection = DigitalAdsPlan::with_budget(dec!(1000), dec!(25)).project();
    let exported = toolkit.export_report(Report::Channel(&projection)).unwrap();
    assert_eq!(exported.get("channel"), Some("digital_ads"));
}

#[test]
fn settings_mistakes_are_configuration_errors() {
    let unordered = r#"
        [grading]
        floor = "F"
        bands = [
            { min_roi_pct = 0, grade = "D" },
            { min_roi_pct = 100, grade = "A" },
        ]
    "#;
    let settings = configuration::load_settings_from_str(unordered).unwrap();
    let err = Roiscope::from_settings(&settings).unwrap_err();
    assert!(matches!(err, RoiError::Metrics(_)));
    assert!(err.is_configuration());

    let unknown_metric = r#"
        [aggregation]
        tracked_metrics = ["roi", "lifetime_value"]
    "#;
    let settings = configuration::load_settings_from_str(unknown_metric).unwrap();
    let err = Roiscope::from_settings(&settings).unwrap_err();
    assert!(err.is_configuration());

    let err = Roiscope::load(sample_settings_path().with_file_name("missing.toml")).unwrap_err();
    assert!(matches!(err, RoiError::Config(_)));
}

#[test]
fn data_mistakes_are_not_configuration_errors() {
    let toolkit = Roiscope::default();

    let err = toolkit.compare(&[]).unwrap_err();
    assert!(!err.is_configuration());

    let mut set = ScenarioSet::best_base_worst();
    set.base.avg_monthly_ad_views = dec!(-1);
    let err = toolkit.run_scenarios(&set).unwrap_err();
    assert!(matches!(err, RoiError::Scenario(_)));
    assert!(!err.is_configuration());

    let err: RoiError = CampaignRecord::builder("", "Nameless").build().unwrap_err().into();
    assert!(!err.is_configuration());
}

#[test]
fn default_settings_match_the_default_toolkit() {
    let from_settings = Roiscope::from_settings(&Settings::default()).unwrap();
    let record = &portfolio()[2];
    assert_eq!(
        from_settings.compute_metrics(record),
        Roiscope::default().compute_metrics(record)
    );
}
