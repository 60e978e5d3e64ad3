use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load settings: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Settings section '{0}' must list at least one metric")]
    EmptyMetricList(&'static str),

    #[error("Scenario '{0}' is declared more than once")]
    DuplicateScenario(String),

    #[error("Invalid setting '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}
