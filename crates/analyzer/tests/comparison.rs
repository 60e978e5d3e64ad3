use analyzer::{Aggregator, AnalyzerError, RecommendationKind};
use core_types::CampaignRecord;
use metrics::RecordMetricsCalculator;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn campaign(index: usize, investment: u32, revenue: u32, customers: u32, engagements: u32) -> CampaignRecord {
    CampaignRecord::builder(format!("C{:03}", index), format!("Campaign {}", index))
        .investment(Decimal::from(investment))
        .revenue(Decimal::from(revenue))
        .new_customers(u64::from(customers))
        .impressions(100_000)
        .engagements(u64::from(engagements))
        .clicks(1_000)
        .conversions(50)
        .build()
        .unwrap()
}

fn campaign_strategy() -> impl Strategy<Value = Vec<(u32, u32, u32, u32)>> {
    prop::collection::vec((0u32..50_000, 0u32..150_000, 0u32..500, 0u32..20_000), 1..12)
}

proptest! {
    #[test]
    fn highest_average_lowest_are_ordered(rows in campaign_strategy()) {
        let records: Vec<_> = rows
            .iter()
            .enumerate()
            .map(|(i, (inv, rev, cust, eng))| campaign(i, *inv, *rev, *cust, *eng))
            .collect();
        let results = RecordMetricsCalculator::default().calculate_batch(&records);
        let comparison = Aggregator::standard().compare(&results, &records).unwrap();

        prop_assert_eq!(comparison.record_count, records.len());
        for (metric, extrema) in &comparison.extrema {
            let average = comparison.average(metric).unwrap();
            prop_assert!(extrema.highest.value >= average, "{}", metric);
            prop_assert!(average >= extrema.lowest.value, "{}", metric);
        }
    }

    #[test]
    fn identical_records_sit_on_every_average(
        copies in 2usize..10,
        (investment, revenue, customers, engagements) in (1u32..50, 1u32..200, 1u32..30, 0u32..20_000),
    ) {
        let records: Vec<_> = (0..copies)
            .map(|i| campaign(i, investment, revenue, customers, engagements))
            .collect();
        let results = RecordMetricsCalculator::default().calculate_batch(&records);
        let comparison = Aggregator::standard().compare(&results, &records).unwrap();

        prop_assert!(comparison.recommendations.is_empty(), "{:?}", comparison.recommendations);
        for (metric, extrema) in &comparison.extrema {
            prop_assert_eq!(comparison.average(metric), Some(extrema.highest.value));
        }
    }

    #[test]
    fn totals_add_up(rows in campaign_strategy()) {
        let records: Vec<_> = rows
            .iter()
            .enumerate()
            .map(|(i, (inv, rev, cust, eng))| campaign(i, *inv, *rev, *cust, *eng))
            .collect();
        let results = RecordMetricsCalculator::default().calculate_batch(&records);
        let totals = Aggregator::standard().compare(&results, &records).unwrap().totals;

        let investment: u64 = rows.iter().map(|r| u64::from(r.0)).sum();
        let revenue: u64 = rows.iter().map(|r| u64::from(r.1)).sum();
        prop_assert_eq!(totals.investment, Decimal::from(investment));
        prop_assert_eq!(totals.revenue, Decimal::from(revenue));
        prop_assert_eq!(totals.profit, totals.revenue - totals.investment);
        if investment == 0 {
            prop_assert_eq!(totals.overall_roi_pct, Decimal::ZERO);
        }
    }
}

#[test]
fn single_record_has_itself_as_both_extremes() {
    let records = vec![campaign(1, 1000, 2500, 10, 3000)];
    let results = RecordMetricsCalculator::default().calculate_batch(&records);
    let comparison = Aggregator::standard().compare(&results, &records).unwrap();

    let roi = &comparison.extrema["roi"];
    assert_eq!(roi.highest, roi.lowest);
    assert_eq!(comparison.average("roi"), Some(dec!(150)));
    assert!(comparison.recommendations.is_empty());
}

#[test]
fn empty_results_are_an_error() {
    assert_eq!(
        Aggregator::standard().compare(&[], &[]).unwrap_err(),
        AnalyzerError::EmptyCollection
    );
}

#[test]
fn recommendations_serialize_as_tagged_values() {
    let records = vec![campaign(1, 1000, 2500, 10, 3000), campaign(2, 4000, 2000, 10, 500)];
    let results = RecordMetricsCalculator::default().calculate_batch(&records);
    let comparison = Aggregator::standard().compare(&results, &records).unwrap();

    let review = comparison
        .recommendations
        .iter()
        .find(|r| matches!(r.kind, RecommendationKind::ReviewSpend { .. }))
        .unwrap();
    assert_eq!(review.record_id.as_str(), "C002");

    let json = serde_json::to_value(&comparison.recommendations).unwrap();
    let first = &json[0];
    assert_eq!(first["record_id"], "C001");
    assert_eq!(first["kind"]["type"], "metric_standing");
    assert_eq!(first["kind"]["metric"], "roi");
    assert_eq!(first["kind"]["standing"], "above_average");
}
