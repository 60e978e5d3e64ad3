use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzerError {
    #[error("Cannot compare an empty collection of records")]
    EmptyCollection,

    #[error("Got {results} metric results for {records} records")]
    LengthMismatch { results: usize, records: usize },

    #[error("Metric configuration error: {0}")]
    Metrics(#[from] metrics::MetricsError),
}
