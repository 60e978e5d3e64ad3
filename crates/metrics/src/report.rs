use core_types::{CampaignId, Grade, RecordField};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::registry::names;

/// The customer count at which cumulative revenue covers the investment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "customers", rename_all = "snake_case")]
pub enum BreakEven {
    Customers(u64),
    /// Revenue per customer is zero, so no customer count covers the investment.
    Unreachable,
}

impl BreakEven {
    pub fn customers(&self) -> Option<u64> {
        match self {
            BreakEven::Customers(count) => Some(*count),
            BreakEven::Unreachable => None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, BreakEven::Customers(_))
    }
}

/// Every derived metric for one record.
///
/// This struct is the output of the `RecordMetricsCalculator` and the input
/// to comparison and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    pub record_id: CampaignId,
    pub record_name: String,
    /// Metric name to value, ordered by name.
    pub values: BTreeMap<String, Decimal>,
    pub grade: Option<Grade>,
    pub break_even: BreakEven,
    /// False when some core numeric field was absent and read as zero.
    pub data_complete: bool,
    pub missing_fields: Vec<RecordField>,
}

impl MetricResult {
    pub fn get(&self, metric: &str) -> Option<Decimal> {
        self.values.get(metric).copied()
    }

    pub fn roi(&self) -> Option<Decimal> {
        self.get(names::ROI)
    }
}
