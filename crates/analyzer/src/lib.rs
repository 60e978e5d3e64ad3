//! Cross-record comparison: extrema, averages, totals and recommendations.

use crate::recommendation::{classify, on_average};
use configuration::AggregationConfig;
use core_types::CampaignRecord;
use metrics::formula::percentage;
use metrics::{MetricRegistry, MetricResult};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

pub mod comparison;
pub mod error;
pub mod recommendation;

// Re-export the core types to provide a clean public API.
pub use comparison::{ComparisonResult, Extrema, RankedValue, Totals};
pub use error::AnalyzerError;
pub use recommendation::{Recommendation, RecommendationKind, Standing};

/// The main comparison engine.
///
/// Holds the aggregation rules and the registry the metric polarities are
/// read from. Both are validated once at construction.
#[derive(Debug, Clone)]
pub struct Aggregator {
    config: AggregationConfig,
    registry: MetricRegistry,
}

impl Aggregator {
    /// Fails when a configured metric is not in the registry.
    pub fn new(config: AggregationConfig, registry: MetricRegistry) -> Result<Self, AnalyzerError> {
        for metric in config
            .tracked_metrics
            .iter()
            .chain(&config.recommendation_metrics)
        {
            registry.lookup(metric)?;
        }
        Ok(Self { config, registry })
    }

    pub fn standard() -> Self {
        Self {
            config: AggregationConfig::default(),
            registry: MetricRegistry::standard(),
        }
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Compares already-calculated results. `records[i]` must be the record `results[i]` came from.
    #[tracing::instrument(skip_all, fields(records = results.len()))]
    pub fn compare(
        &self,
        results: &[MetricResult],
        records: &[CampaignRecord],
    ) -> Result<ComparisonResult, AnalyzerError> {
        // 1. Validate
        if results.is_empty() {
            return Err(AnalyzerError::EmptyCollection);
        }
        if results.len() != records.len() {
            return Err(AnalyzerError::LengthMismatch {
                results: results.len(),
                records: records.len(),
            });
        }

        // 2. Extrema and averages
        let mut extrema = BTreeMap::new();
        let mut averages = BTreeMap::new();
        for metric in &self.config.tracked_metrics {
            let values = metric_values(results, metric)?;
            extrema.insert(metric.clone(), find_extrema(results, &values));
            averages.insert(metric.clone(), average(&values));
        }

        // 3. Totals
        let totals = totals(records);

        // 4. Recommendations
        let recommendations = self.recommend(results, records)?;

        tracing::info!(
            tracked = extrema.len(),
            recommendations = recommendations.len(),
            overall_roi = %totals.overall_roi_pct,
            "Comparison complete"
        );

        Ok(ComparisonResult {
            record_count: results.len(),
            extrema,
            averages,
            totals,
            recommendations,
        })
    }

    fn recommend(
        &self,
        results: &[MetricResult],
        records: &[CampaignRecord],
    ) -> Result<Vec<Recommendation>, AnalyzerError> {
        let mut per_metric = Vec::with_capacity(self.config.recommendation_metrics.len());
        for metric in &self.config.recommendation_metrics {
            let polarity = self.registry.lookup(metric)?.polarity;
            let values = metric_values(results, metric)?;
            let average = average(&values);
            per_metric.push((metric.as_str(), polarity, values, average));
        }

        let investments: Vec<Decimal> = records.iter().map(CampaignRecord::investment).collect();
        let average_investment = average(&investments);
        let rois: Option<Vec<Decimal>> = results.iter().map(MetricResult::roi).collect();
        let average_roi = rois.as_deref().map(average);

        let mut recommendations = Vec::new();
        for (index, (result, record)) in results.iter().zip(records).enumerate() {
            let mut push = |kind: RecommendationKind| {
                recommendations.push(Recommendation {
                    record_id: result.record_id.clone(),
                    record_name: result.record_name.clone(),
                    kind,
                })
            };

            for (metric, polarity, values, average) in &per_metric {
                if let Some(kind) = classify(
                    metric,
                    *polarity,
                    values[index],
                    *average,
                    self.config.critical_deviation_pct,
                ) {
                    push(kind);
                }
            }

            if let (Some(roi), Some(average_roi)) = (result.roi(), average_roi) {
                let investment = record.investment();
                let above_spend = investment > average_investment && !on_average(investment, average_investment);
                let below_return = roi < average_roi && !on_average(roi, average_roi);
                if above_spend && below_return {
                    tracing::debug!(record = %result.record_id, %investment, %roi, "Spend above average with below-average return");
                    push(RecommendationKind::ReviewSpend {
                        investment,
                        average_investment,
                        roi,
                        average_roi,
                    });
                }
            }
        }

        Ok(recommendations)
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::standard()
    }
}

fn metric_values(results: &[MetricResult], metric: &str) -> Result<Vec<Decimal>, AnalyzerError> {
    results
        .iter()
        .map(|result| {
            result
                .get(metric)
                .ok_or_else(|| AnalyzerError::from(metrics::MetricsError::UnknownMetric(metric.to_string())))
        })
        .collect()
}

/// First occurrence wins on ties: a later record replaces the current holder
/// only with a strictly better value.
fn find_extrema(results: &[MetricResult], values: &[Decimal]) -> Extrema {
    let ranked = |index: usize| RankedValue {
        record_id: results[index].record_id.clone(),
        record_name: results[index].record_name.clone(),
        value: values[index],
    };

    let (mut high, mut low) = (0, 0);
    for (index, value) in values.iter().enumerate().skip(1) {
        if *value > values[high] {
            high = index;
        }
        if *value < values[low] {
            low = index;
        }
    }

    Extrema {
        highest: ranked(high),
        lowest: ranked(low),
    }
}

/// The arithmetic mean, clamped to the extremes of `values`.
///
/// Rounding in the sum can push the mean one digit past an extreme, which would
/// also move it off the value a set of identical records shares. Callers
/// guarantee a non-empty slice.
fn average(values: &[Decimal]) -> Decimal {
    let count = Decimal::from(values.len());
    let mean = values
        .iter()
        .try_fold(Decimal::ZERO, |sum, value| sum.checked_add(*value))
        .map(|sum| sum / count)
        .unwrap_or_else(|| {
            values
                .iter()
                .fold(Decimal::ZERO, |sum, value| sum.saturating_add(*value / count))
        });

    let (low, high) = values
        .iter()
        .fold((values[0], values[0]), |(low, high), value| (low.min(*value), high.max(*value)));
    mean.clamp(low, high)
}

fn totals(records: &[CampaignRecord]) -> Totals {
    let investment = records
        .iter()
        .map(CampaignRecord::investment)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let revenue = records
        .iter()
        .map(CampaignRecord::revenue)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let profit = revenue.saturating_sub(investment);
    Totals {
        investment,
        revenue,
        profit,
        new_customers: records
            .iter()
            .map(CampaignRecord::new_customers)
            .fold(0, u64::saturating_add),
        overall_roi_pct: percentage(profit, investment),
    }
}
