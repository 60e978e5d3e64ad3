//! # Roiscope
//!
//! Campaign and reward-economy ROI toolkit. This crate is the facade over the
//! workspace and exposes four operations:
//!
//! - `compute_metrics`: derive, grade and break-even one `CampaignRecord`.
//! - `compare`: extrema, averages, totals and recommendations for a collection.
//! - `run_scenarios`: evaluate a `ScenarioSet` of the tier-capped reward economy.
//! - `export_report`: flatten any result into plain key/value rows.
//!
//! ## Architectural Principles
//!
//! - **Layer 0:** `core-types` (records, grades) and `configuration` (settings).
//! - **Layer 1:** `metrics`, `analyzer` and `scenarios`: pure, synchronous logic.
//! - **Layer 2:** this facade, which wires the layer 1 components from one
//!   validated `Settings` value. It performs no I/O beyond optionally reading
//!   the settings file, and never installs a tracing subscriber.

use analyzer::{Aggregator, ComparisonResult};
use configuration::{ScenarioSet, Settings};
use core_types::CampaignRecord;
use metrics::{Grader, MetricRegistry, MetricResult, RecordMetricsCalculator};
use scenarios::{ScenarioEngine, ScenarioResult};
use std::path::Path;

pub mod error;
pub mod export;

// Re-export the core types to provide a clean public API.
pub use error::RoiError;
pub use export::{ExportedReport, Report, ReportKind, ReportRow};

pub use analyzer;
pub use configuration;
pub use core_types;
pub use metrics;
pub use scenarios;

/// The wired toolkit. Cheap to share: every component holds only immutable configuration.
#[derive(Debug, Clone, Default)]
pub struct Roiscope {
    calculator: RecordMetricsCalculator,
    aggregator: Aggregator,
    engine: ScenarioEngine,
    scenarios: ScenarioSet,
}

impl Roiscope {
    /// Builds every component from validated settings.
    ///
    /// Fails on configuration mistakes only: invalid grade bands, or a tracked
    /// metric that is not registered.
    pub fn from_settings(settings: &Settings) -> Result<Self, RoiError> {
        configuration::validate(settings)?;

        let registry = MetricRegistry::standard();
        let grader = Grader::new(&settings.grading)?;
        let aggregator = Aggregator::new(settings.aggregation.clone(), registry.clone())?;

        tracing::info!(
            metrics = registry.len(),
            bands = grader.bands().len(),
            scenarios = settings.scenarios.scenarios.len(),
            "Toolkit configured"
        );

        Ok(Self {
            calculator: RecordMetricsCalculator::new(registry, grader),
            aggregator,
            engine: ScenarioEngine::new(settings.benchmarks.clone()),
            scenarios: settings.scenarios.clone(),
        })
    }

    /// Loads a TOML settings file and builds the toolkit from it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RoiError> {
        let settings = configuration::load_settings(path)?;
        Self::from_settings(&settings)
    }

    pub fn calculator(&self) -> &RecordMetricsCalculator {
        &self.calculator
    }

    pub fn engine(&self) -> &ScenarioEngine {
        &self.engine
    }

    /// The scenario set the settings declared.
    pub fn configured_scenarios(&self) -> &ScenarioSet {
        &self.scenarios
    }

    pub fn compute_metrics(&self, record: &CampaignRecord) -> MetricResult {
        self.calculator.calculate(record)
    }

    /// Runs the calculator over every record, then compares the results.
    pub fn compare(&self, records: &[CampaignRecord]) -> Result<ComparisonResult, RoiError> {
        let results = self.calculator.calculate_batch(records);
        Ok(self.aggregator.compare(&results, records)?)
    }

    pub fn run_scenarios(&self, set: &ScenarioSet) -> Result<Vec<ScenarioResult>, RoiError> {
        Ok(self.engine.run(set)?)
    }

    /// Runs the scenario set from the settings.
    pub fn run_configured_scenarios(&self) -> Result<Vec<ScenarioResult>, RoiError> {
        self.run_scenarios(&self.scenarios)
    }

    pub fn export_report(&self, report: Report<'_>) -> Result<ExportedReport, RoiError> {
        Ok(export::shape(report)?)
    }
}
