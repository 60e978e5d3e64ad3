use crate::recommendation::{Recommendation, RecommendationKind, Standing};
use core_types::CampaignId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A metric value attributed to the record that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedValue {
    pub record_id: CampaignId,
    pub record_name: String,
    pub value: Decimal,
}

/// The best and worst performers on one metric, by raw value.
///
/// On ties the record that appears first in the input wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extrema {
    pub highest: RankedValue,
    pub lowest: RankedValue,
}

/// Sums across the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub investment: Decimal,
    pub revenue: Decimal,
    pub profit: Decimal,
    pub new_customers: u64,
    /// Profit over total investment; zero when nothing was invested.
    pub overall_roi_pct: Decimal,
}

/// The outcome of comparing a collection of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub record_count: usize,
    pub extrema: BTreeMap<String, Extrema>,
    pub averages: BTreeMap<String, Decimal>,
    pub totals: Totals,
    pub recommendations: Vec<Recommendation>,
}

impl ComparisonResult {
    pub fn highest(&self, metric: &str) -> Option<&RankedValue> {
        self.extrema.get(metric).map(|e| &e.highest)
    }

    pub fn lowest(&self, metric: &str) -> Option<&RankedValue> {
        self.extrema.get(metric).map(|e| &e.lowest)
    }

    pub fn average(&self, metric: &str) -> Option<Decimal> {
        self.averages.get(metric).copied()
    }

    /// Recommendations flagged as critical.
    pub fn critical(&self) -> impl Iterator<Item = &Recommendation> {
        self.recommendations.iter().filter(|r| {
            matches!(
                r.kind,
                RecommendationKind::MetricStanding {
                    standing: Standing::Critical,
                    ..
                }
            )
        })
    }
}
