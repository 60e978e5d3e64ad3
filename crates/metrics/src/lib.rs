//! # Roiscope Metrics Engine
//!
//! This crate derives the standard campaign metrics (ROI, CAC, engagement,
//! CTR, CVR, ROAS and friends) from a single `CampaignRecord` and grades the
//! result on a configurable letter scale.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It depends only on
//!   `core-types` and `configuration` (Layer 0) and performs no I/O.
//! - **Declarative Formulas:** Every metric is a `MetricDefinition` held in a
//!   `MetricRegistry`. A dividing formula cannot be registered without an
//!   explicit zero-denominator value, so no metric ever divides by zero.
//! - **Stateless Calculation:** The `RecordMetricsCalculator` borrows records and
//!   returns owned `MetricResult`s. Calls are independent and safe to run in
//!   parallel.
//!
//! ## Public API
//!
//! - `RecordMetricsCalculator`: Derives, grades and computes break-even for a record.
//! - `MetricRegistry` / `MetricDefinition`: The formula table.
//! - `Grader`: ROI percentage to letter grade.
//! - `evaluate_position`: Investor-side ROI, annualized return and MOIC.
//! - `DigitalAdsPlan` / `FlyerPlan`: Funnel projections convertible into records.

pub mod calculator;
pub mod channel;
pub mod error;
pub mod formula;
pub mod grader;
pub mod investor;
pub mod registry;
pub mod report;

// Re-export the core types to provide a clean public API.
pub use calculator::{RecordMetricsCalculator, break_even_customers};
pub use channel::{Channel, ChannelProjection, DigitalAdsPlan, FlyerPlan};
pub use error::MetricsError;
pub use grader::Grader;
pub use investor::{InvestorReport, evaluate_position};
pub use registry::{MetricDefinition, MetricRegistry, Operand, names, standard_definitions};
pub use report::{BreakEven, MetricResult};
