//! # Roiscope Scenario Engine
//!
//! What-if modelling of a tier-capped reward economy: users earn cash credit
//! and reward points for verified ad views, brands pay a fixed cost per view,
//! and each user tier caps the cash it can unlock per month.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** Depends on `configuration` for the assumption and
//!   scenario structs and on `metrics` for the guarded arithmetic it shares
//!   with the record calculator. No I/O.
//! - **Resolve, then Evaluate:** A scenario is a base `AssumptionSet` plus a
//!   `ScenarioDelta`. The engine resolves and validates the tier distribution
//!   before deriving anything, so every result comes from a consistent set.
//!
//! ## Public API
//!
//! - `ScenarioEngine`: `resolve`, `evaluate`, `run` and `sensitivity`.
//! - `ScenarioResult` and its parts.
//! - `Knob`: the scalar assumptions a sensitivity sweep can vary.

pub mod economics;
pub mod engine;
pub mod error;
pub mod growth;
pub mod result;
pub mod sensitivity;

// Re-export the core types to provide a clean public API.
pub use engine::{SHARE_TOLERANCE, ScenarioEngine, validate};
pub use error::ScenarioError;
pub use growth::{GrowthProjection, QuarterProjection};
pub use result::{
    BenchmarkComparison, BrandCostComparison, InvestorUnitEconomics, MonthlySummary,
    PerBagEconomics, PerUserEconomics, ScenarioResult, StoreValue, TierPayout,
};
pub use sensitivity::{Knob, SensitivityPoint};
