use core_types::{CampaignRecord, Grade};
use metrics::{BreakEven, Grader, MetricResult, RecordMetricsCalculator, names};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn record(investment: u32, revenue: u32, customers: u32) -> CampaignRecord {
    CampaignRecord::builder("P1", "Property")
        .investment(Decimal::from(investment))
        .revenue(Decimal::from(revenue))
        .new_customers(u64::from(customers))
        .build()
        .unwrap()
}

#[test]
fn result_serializes_with_string_grade_and_tagged_break_even() {
    let record = CampaignRecord::builder("C001", "Spring Launch")
        .investment(dec!(10000))
        .revenue(dec!(25000))
        .new_customers(150)
        .build()
        .unwrap();
    let result = RecordMetricsCalculator::default().calculate(&record);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["grade"], "B-");
    assert_eq!(json["break_even"]["status"], "customers");
    assert_eq!(json["break_even"]["customers"], 60);

    let back: MetricResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, result);
}

proptest! {
    #[test]
    fn every_registered_metric_is_present(investment in 0u32..1_000_000, revenue in 0u32..1_000_000, customers in 0u32..10_000) {
        let calculator = RecordMetricsCalculator::default();
        let result = calculator.calculate(&record(investment, revenue, customers));
        for definition in calculator.registry().definitions() {
            prop_assert!(result.values.contains_key(&definition.name));
        }
    }

    #[test]
    fn profit_sign_matches_roi_sign(investment in 1u32..1_000_000, revenue in 0u32..1_000_000) {
        let result = RecordMetricsCalculator::default().calculate(&record(investment, revenue, 10));
        let profit = result.get(names::PROFIT).unwrap();
        let roi = result.roi().unwrap();
        prop_assert_eq!(profit.is_sign_negative() && !profit.is_zero(), roi < Decimal::ZERO);
        prop_assert_eq!(result.grade == Some(Grade::F), roi < Decimal::ZERO);
    }

    #[test]
    fn break_even_revenue_covers_investment(investment in 1u32..1_000_000, revenue in 1u32..1_000_000, customers in 1u32..10_000) {
        let rec = record(investment, revenue, customers);
        let needed = match RecordMetricsCalculator::default().calculate(&rec).break_even {
            BreakEven::Customers(n) => n,
            BreakEven::Unreachable => return Err(TestCaseError::fail("reachable inputs")),
        };
        let per_customer = Decimal::from(revenue) / Decimal::from(customers);
        let investment = Decimal::from(investment);
        prop_assert!(Decimal::from(needed) * per_customer >= investment - dec!(0.000001));
        prop_assert!(Decimal::from(needed.saturating_sub(1)) * per_customer < investment);
    }

    #[test]
    fn grade_never_decreases_with_roi(a in -1000i64..2000, b in -1000i64..2000) {
        let grader = Grader::standard();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(grader.grade(Decimal::from(low)) <= grader.grade(Decimal::from(high)));
    }
}
