use crate::error::ConfigError;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod scenario_config;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use scenario_config::{
    AssumptionSet, NamedScenario, ScenarioDelta, ScenarioSet, TierDefinition, UnlockCap,
};
pub use settings::{AggregationConfig, Benchmark, BenchmarkSet, GradeBand, GradingConfig, Settings};

/// Loads the settings from a TOML file (the extension may be omitted).
///
/// Sections missing from the file keep their defaults. The merged result is
/// validated before it is returned.
pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "Loading settings");

    let builder = config::Config::builder()
        .add_source(config::File::from(path))
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    validate(&settings)?;
    Ok(settings)
}

/// Loads the settings from an in-memory TOML document.
pub fn load_settings_from_str(toml: &str) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    validate(&settings)?;
    Ok(settings)
}

/// Checks the cross-field rules deserialization cannot express.
///
/// Grade band ordering and tier distributions are validated by the components
/// that consume them.
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    let aggregation = &settings.aggregation;
    if aggregation.tracked_metrics.is_empty() {
        return Err(ConfigError::EmptyMetricList("aggregation.tracked_metrics"));
    }
    if aggregation.recommendation_metrics.is_empty() {
        return Err(ConfigError::EmptyMetricList("aggregation.recommendation_metrics"));
    }
    if aggregation.critical_deviation_pct <= Decimal::ZERO {
        return Err(ConfigError::Invalid {
            field: "aggregation.critical_deviation_pct",
            reason: format!("must be positive, got {}", aggregation.critical_deviation_pct),
        });
    }

    if settings.grading.bands.is_empty() {
        return Err(ConfigError::Invalid {
            field: "grading.bands",
            reason: "at least one band is required".to_string(),
        });
    }

    for benchmark in &settings.benchmarks.platforms {
        if benchmark.cpm < Decimal::ZERO {
            return Err(ConfigError::Invalid {
                field: "benchmarks.platforms.cpm",
                reason: format!("'{}' has a negative CPM", benchmark.name),
            });
        }
    }

    let mut seen = BTreeSet::new();
    for scenario in &settings.scenarios.scenarios {
        if !seen.insert(scenario.name.as_str()) {
            return Err(ConfigError::DuplicateScenario(scenario.name.clone()));
        }
    }

    Ok(())
}
