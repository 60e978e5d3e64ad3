use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A record is missing a required identity field or carries inconsistent identity data.
    #[error("Invalid record: {field} {reason}")]
    Validation { field: &'static str, reason: String },
}

impl CoreError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        CoreError::Validation {
            field,
            reason: reason.into(),
        }
    }
}
