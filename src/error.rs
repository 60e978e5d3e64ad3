use analyzer::AnalyzerError;
use configuration::error::ConfigError;
use core_types::CoreError;
use metrics::MetricsError;
use scenarios::ScenarioError;
use thiserror::Error;

/// Every failure the toolkit can surface, tagged by the component that raised it.
#[derive(Error, Debug)]
pub enum RoiError {
    #[error("Validation error: {0}")]
    Validation(#[from] CoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Metric error: {0}")]
    Metrics(#[from] MetricsError),

    #[error("Comparison error: {0}")]
    Analyzer(#[from] AnalyzerError),

    #[error("Scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    #[error("Failed to shape report: {0}")]
    Export(#[from] serde_json::Error),
}

impl RoiError {
    /// True for mistakes in settings or metric definitions, which are fatal at startup.
    /// Everything else is a problem with the data of a single call.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            RoiError::Config(_)
                | RoiError::Metrics(_)
                | RoiError::Analyzer(AnalyzerError::Metrics(_))
        )
    }
}
