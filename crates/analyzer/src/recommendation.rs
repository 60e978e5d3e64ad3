use core_types::{CampaignId, Polarity};
use metrics::formula::percentage;
use metrics::names;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Where a record sits relative to the collection average on one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    AboveAverage,
    BelowAverage,
    /// An unfavorable deviation large enough to need attention, or a losing ROI.
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecommendationKind {
    MetricStanding {
        metric: String,
        standing: Standing,
        value: Decimal,
        average: Decimal,
        /// Signed deviation from the average; `None` when the average is zero.
        deviation_pct: Option<Decimal>,
        favorable: bool,
    },
    /// The record spends more than average but returns less than average.
    ReviewSpend {
        investment: Decimal,
        average_investment: Decimal,
        roi: Decimal,
        average_roi: Decimal,
    },
}

/// A structured finding about one record. Rendering it as text is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub record_id: CampaignId,
    pub record_name: String,
    pub kind: RecommendationKind,
}

/// Relative distance under which a value counts as sitting on its average.
const ON_AVERAGE_TOLERANCE: Decimal = dec!(0.00000000000000000001);

/// True when `value` equals `average` up to the last digits Decimal can round away.
pub(crate) fn on_average(value: Decimal, average: Decimal) -> bool {
    let magnitude = average.abs().max(Decimal::ONE);
    value.saturating_sub(average).abs() <= magnitude * ON_AVERAGE_TOLERANCE
}

/// Classifies one value against its average.
///
/// Returns `None` when the value sits on the average.
pub(crate) fn classify(
    metric: &str,
    polarity: Polarity,
    value: Decimal,
    average: Decimal,
    critical_deviation_pct: Decimal,
) -> Option<RecommendationKind> {
    if on_average(value, average) {
        return None;
    }

    let favorable = polarity.is_favorable(value, average);
    let deviation_pct = if average.is_zero() {
        None
    } else {
        Some(percentage(value.saturating_sub(average), average.abs()))
    };

    let severe = !favorable
        && deviation_pct.is_some_and(|deviation| deviation.abs() >= critical_deviation_pct);
    let losing = metric == names::ROI && value < Decimal::ZERO;

    let standing = if severe || losing {
        Standing::Critical
    } else if value > average {
        Standing::AboveAverage
    } else {
        Standing::BelowAverage
    };

    Some(RecommendationKind::MetricStanding {
        metric: metric.to_string(),
        standing,
        value,
        average,
        deviation_pct,
        favorable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn standing_of(kind: Option<RecommendationKind>) -> Option<Standing> {
        match kind {
            Some(RecommendationKind::MetricStanding { standing, .. }) => Some(standing),
            _ => None,
        }
    }

    #[test]
    fn value_on_the_average_is_skipped() {
        assert!(classify("roi", Polarity::HigherIsBetter, dec!(10), dec!(10), dec!(50)).is_none());
    }

    #[test]
    fn rounding_noise_counts_as_on_the_average() {
        let value = dec!(233.33333333333333333333333333);
        let average = dec!(233.33333333333333333333333332);
        assert!(on_average(value, average));
        assert!(classify("roi", Polarity::HigherIsBetter, value, average, dec!(50)).is_none());
        assert!(!on_average(dec!(233.34), average));
    }

    #[test]
    fn large_unfavorable_deviation_is_critical() {
        // CAC is lower-is-better: twice the average is a 100% unfavorable deviation.
        let kind = classify("cac", Polarity::LowerIsBetter, dec!(100), dec!(50), dec!(50));
        assert_eq!(standing_of(kind), Some(Standing::Critical));

        // The same deviation in the favorable direction is merely above average.
        let kind = classify("engagement_rate", Polarity::HigherIsBetter, dec!(10), dec!(5), dec!(50));
        assert_eq!(standing_of(kind), Some(Standing::AboveAverage));
    }

    #[test]
    fn small_unfavorable_deviation_is_below_average() {
        let kind = classify("engagement_rate", Polarity::HigherIsBetter, dec!(4), dec!(5), dec!(50));
        match kind {
            Some(RecommendationKind::MetricStanding {
                standing,
                deviation_pct,
                favorable,
                ..
            }) => {
                assert_eq!(standing, Standing::BelowAverage);
                assert_eq!(deviation_pct, Some(dec!(-20)));
                assert!(!favorable);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn negative_roi_is_always_critical() {
        let kind = classify("roi", Polarity::HigherIsBetter, dec!(-5), dec!(-100), dec!(50));
        assert_eq!(standing_of(kind), Some(Standing::Critical));
    }

    #[test]
    fn zero_average_has_no_deviation() {
        let kind = classify("ctr", Polarity::HigherIsBetter, dec!(-1), Decimal::ZERO, dec!(50));
        match kind {
            Some(RecommendationKind::MetricStanding {
                deviation_pct,
                standing,
                ..
            }) => {
                assert_eq!(deviation_pct, None);
                assert_eq!(standing, Standing::BelowAverage);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
