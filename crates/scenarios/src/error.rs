use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    #[error("Tier shares must be non-negative and sum to 1.0, got a total of {total}")]
    InvalidTierDistribution { total: Decimal },

    #[error("Scenario overrides the share of unknown tier '{0}'")]
    UnknownTier(String),

    #[error("Invalid assumption '{field}': {reason}")]
    InvalidAssumption { field: &'static str, reason: String },
}
