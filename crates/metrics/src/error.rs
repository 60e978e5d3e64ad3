use core_types::RecordField;
use thiserror::Error;

/// Configuration errors raised while building or querying the metric set.
///
/// All of these indicate a programming or settings mistake and are expected
/// to surface at startup rather than during calculation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    #[error("Metric '{metric}' divides by '{denominator}' but declares no edge-case value")]
    MissingEdgeCasePolicy {
        metric: String,
        denominator: RecordField,
    },

    #[error("Metric '{0}' is registered more than once")]
    DuplicateMetric(String),

    #[error("Unknown metric '{0}'")]
    UnknownMetric(String),

    #[error("Invalid grade bands: {0}")]
    InvalidGradeBands(String),
}
