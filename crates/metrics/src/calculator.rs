use crate::error::MetricsError;
use crate::grader::Grader;
use crate::registry::{names, MetricRegistry};
use crate::report::{BreakEven, MetricResult};
use core_types::CampaignRecord;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// A stateless calculator deriving the full metric set of one record.
///
/// It owns the immutable metric registry and grade scale it evaluates with;
/// the records themselves are only ever borrowed.
#[derive(Debug, Clone, Default)]
pub struct RecordMetricsCalculator {
    registry: MetricRegistry,
    grader: Grader,
}

impl RecordMetricsCalculator {
    pub fn new(registry: MetricRegistry, grader: Grader) -> Self {
        Self { registry, grader }
    }

    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    pub fn grader(&self) -> &Grader {
        &self.grader
    }

    /// The main entry point for deriving a record's metrics.
    ///
    /// Absent numeric fields read as zero and clear `data_complete`; ratios with a
    /// zero denominator take their registered edge-case value.
    #[tracing::instrument(name = "calculate_record", skip(self, record), fields(campaign = %record.id()))]
    pub fn calculate(&self, record: &CampaignRecord) -> MetricResult {
        let missing_fields = record.missing_fields();
        if !missing_fields.is_empty() {
            tracing::warn!(
                missing = ?missing_fields,
                "Record is incomplete; absent fields are read as zero."
            );
        }

        let values = self.evaluate_registry(record);
        let grade = values.get(names::ROI).map(|roi| self.grader.grade(*roi));
        let break_even = break_even_customers(record);

        tracing::debug!(?grade, ?break_even, metrics = values.len(), "Record metrics derived");

        MetricResult {
            record_id: record.id().clone(),
            record_name: record.name().to_string(),
            values,
            grade,
            break_even,
            data_complete: missing_fields.is_empty(),
            missing_fields,
        }
    }

    /// Derives metrics for every record, preserving input order.
    pub fn calculate_batch(&self, records: &[CampaignRecord]) -> Vec<MetricResult> {
        records.iter().map(|record| self.calculate(record)).collect()
    }

    /// Evaluates a single named metric.
    pub fn calculate_metric(&self, record: &CampaignRecord, metric: &str) -> Result<Decimal, MetricsError> {
        let definition = self.registry.lookup(metric)?;
        Ok(definition.evaluate(record))
    }

    fn evaluate_registry(&self, record: &CampaignRecord) -> BTreeMap<String, Decimal> {
        self.registry
            .definitions()
            .iter()
            .map(|definition| {
                if definition.hits_edge_case(record) {
                    tracing::debug!(
                        metric = %definition.name,
                        edge_case = ?definition.edge_case,
                        "Denominator is not positive; using the edge-case value"
                    );
                }
                (definition.name.clone(), definition.evaluate(record))
            })
            .collect()
    }
}

/// Smallest customer count whose revenue covers the investment.
///
/// Computed as `ceil(investment * customers / revenue)`, which equals
/// `ceil(investment / revenue_per_customer)` without the rounding error of
/// dividing twice.
pub fn break_even_customers(record: &CampaignRecord) -> BreakEven {
    let investment = record.investment();
    let revenue = record.revenue();
    let customers = Decimal::from(record.new_customers());

    if revenue <= Decimal::ZERO || customers.is_zero() {
        return BreakEven::Unreachable;
    }
    if investment <= Decimal::ZERO {
        return BreakEven::Customers(0);
    }

    investment
        .checked_mul(customers)
        .and_then(|scaled| scaled.checked_div(revenue))
        .and_then(|count| count.ceil().to_u64())
        .map(BreakEven::Customers)
        .unwrap_or_else(|| {
            tracing::warn!(%investment, %revenue, %customers, "Break-even count is out of range");
            BreakEven::Unreachable
        })
}
