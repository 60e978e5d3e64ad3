use configuration::{AssumptionSet, ScenarioDelta, ScenarioSet};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use scenarios::{Knob, ScenarioEngine, ScenarioError};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn best_base_worst_are_ordered_by_revenue_and_margin() {
    init_tracing();
    let results = ScenarioEngine::default().run(&ScenarioSet::best_base_worst()).unwrap();
    let (worst, base, best) = (&results[0], &results[1], &results[2]);

    assert_eq!(base.monthly.total_revenue, dec!(34000));
    assert!(best.monthly.total_revenue > base.monthly.total_revenue);
    assert!(base.monthly.total_revenue > worst.monthly.total_revenue);
    assert!(best.monthly.total_margin > base.monthly.total_margin);
    assert!(base.monthly.total_margin > worst.monthly.total_margin);
    assert!(best.store_value.total_store_value > worst.store_value.total_store_value);
}

#[test]
fn conservative_moderate_optimistic_resolve_their_presets() {
    let results = ScenarioEngine::default()
        .run(&ScenarioSet::conservative_moderate_optimistic())
        .unwrap();
    let views: Vec<Decimal> = results.iter().map(|r| r.assumptions.avg_monthly_ad_views).collect();
    assert_eq!(views, vec![dec!(8), dec!(12), dec!(20)]);

    let optimistic = &results[2];
    assert_eq!(optimistic.monthly.total_revenue, dec!(54000));
    let gold = optimistic
        .assumptions
        .tiers
        .iter()
        .find(|t| t.name == "Gold")
        .unwrap();
    assert_eq!(gold.share, dec!(0.20));
}

#[test]
fn one_bad_scenario_fails_the_run() {
    let mut set = ScenarioSet::best_base_worst();
    set.scenarios[1].delta.tier_shares.insert("Silver".to_string(), dec!(0.40));
    let err = ScenarioEngine::default().run(&set).unwrap_err();
    assert!(matches!(err, ScenarioError::InvalidTierDistribution { .. }));
}

#[test]
fn results_serialize_for_export() {
    let result = ScenarioEngine::default()
        .evaluate("base", AssumptionSet::default())
        .unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["name"], "base");
    let store: Decimal = json["store_value"]["total_store_value"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(store, dec!(214380));
    assert_eq!(json["per_user"]["tiers"].as_array().unwrap().len(), 4);
    assert_eq!(json["growth"]["quarters"].as_array().unwrap().len(), 4);
}

proptest! {
    #[test]
    fn more_views_never_lower_revenue_or_margin(low in 0u32..60, extra in 0u32..60) {
        let engine = ScenarioEngine::default();
        let base = AssumptionSet::default();
        let evaluate = |views: u32| {
            let delta = ScenarioDelta {
                avg_monthly_ad_views: Some(Decimal::from(views)),
                ..ScenarioDelta::default()
            };
            let resolved = engine.resolve(&base, &delta).unwrap();
            engine.evaluate("sweep", resolved).unwrap()
        };

        let lower = evaluate(low);
        let higher = evaluate(low + extra);
        prop_assert!(higher.monthly.total_revenue >= lower.monthly.total_revenue);
        prop_assert!(higher.monthly.total_margin >= lower.monthly.total_margin);
    }

    #[test]
    fn higher_redemption_never_lowers_store_value(low in 0u32..=100, extra in 0u32..=100) {
        let high = (low + extra).min(100);
        let engine = ScenarioEngine::default();
        let base = AssumptionSet::default();
        let store = |rate: u32| {
            let a = Knob::RewardRedemptionRatePct.apply(&base, Decimal::from(rate));
            engine.evaluate("sweep", a).unwrap().store_value.total_store_value
        };
        prop_assert!(store(high) >= store(low));
    }

    #[test]
    fn shares_off_by_a_tenth_are_rejected(index in 0usize..4, positive in any::<bool>()) {
        let mut a = AssumptionSet::default();
        a.tiers[index].share += if positive { dec!(0.1) } else { dec!(-0.1) };
        let err = scenarios::validate(&a).unwrap_err();
        let is_distribution_error = matches!(err, ScenarioError::InvalidTierDistribution { .. });
        prop_assert!(is_distribution_error);
    }
}
