use crate::scenario_config::ScenarioSet;
use core_types::Grade;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The root configuration structure for the entire toolkit.
///
/// Every section falls back to its `Default` when omitted from the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grading: GradingConfig,
    pub aggregation: AggregationConfig,
    pub benchmarks: BenchmarkSet,
    pub scenarios: ScenarioSet,
}

/// Ordered ROI bands used to grade a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Bands ordered from the highest threshold to the lowest.
    pub bands: Vec<GradeBand>,
    /// Grade for any ROI below the lowest band.
    pub floor: Grade,
}

/// A lower-bound ROI threshold (inclusive) and the grade it earns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeBand {
    pub min_roi_pct: Decimal,
    pub grade: Grade,
}

impl GradeBand {
    pub fn new(min_roi_pct: Decimal, grade: Grade) -> Self {
        Self { min_roi_pct, grade }
    }
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            bands: vec![
                GradeBand::new(dec!(500), Grade::APlus),
                GradeBand::new(dec!(400), Grade::A),
                GradeBand::new(dec!(300), Grade::BPlus),
                GradeBand::new(dec!(200), Grade::B),
                GradeBand::new(dec!(150), Grade::BMinus),
                GradeBand::new(dec!(100), Grade::CPlus),
                GradeBand::new(dec!(50), Grade::C),
                GradeBand::new(dec!(0), Grade::D),
            ],
            floor: Grade::F,
        }
    }
}

/// Which metrics a comparison tracks and how recommendations are classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Metrics that get extrema and averages.
    pub tracked_metrics: Vec<String>,
    /// Metrics each record is classified against the average on.
    pub recommendation_metrics: Vec<String>,
    /// Unfavorable deviation from the average (in percent) that escalates to critical.
    pub critical_deviation_pct: Decimal,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            tracked_metrics: ["roi", "profit", "cac", "engagement_rate", "ctr", "cvr", "roas"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            recommendation_metrics: ["roi", "engagement_rate", "cac"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            critical_deviation_pct: dec!(50),
        }
    }
}

/// External advertising benchmarks the reward model is compared against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkSet {
    /// Industry click-through rate, used when a platform does not carry its own.
    pub industry_ctr_pct: Decimal,
    pub platforms: Vec<Benchmark>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub name: String,
    /// Cost per thousand impressions.
    pub cpm: Decimal,
    #[serde(default)]
    pub ctr_pct: Option<Decimal>,
}

impl Benchmark {
    pub fn new(name: impl Into<String>, cpm: Decimal) -> Self {
        Self {
            name: name.into(),
            cpm,
            ctr_pct: None,
        }
    }
}

impl Default for BenchmarkSet {
    fn default() -> Self {
        Self {
            industry_ctr_pct: dec!(1.0),
            platforms: vec![
                Benchmark::new("Meta", dec!(10.00)),
                Benchmark::new("TikTok", dec!(8.50)),
            ],
        }
    }
}
