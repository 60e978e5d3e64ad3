use crate::error::MetricsError;
use crate::formula::{overflow_bound, HUNDRED};
use core_types::{CampaignRecord, Polarity, RecordField, Unit};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Names of the metrics in the standard registry.
pub mod names {
    pub const ROI: &str = "roi";
    pub const PROFIT: &str = "profit";
    pub const PROFIT_MARGIN: &str = "profit_margin";
    pub const ROAS: &str = "roas";
    pub const CAC: &str = "cac";
    pub const REVENUE_PER_CUSTOMER: &str = "revenue_per_customer";
    pub const ENGAGEMENT_RATE: &str = "engagement_rate";
    pub const CTR: &str = "ctr";
    pub const CVR: &str = "cvr";
    pub const CPC: &str = "cpc";
    pub const CPA: &str = "cpa";
}

/// The numerator of a metric formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    Field(RecordField),
    /// `minuend - subtrahend`, e.g. revenue minus investment.
    Difference {
        minuend: RecordField,
        subtrahend: RecordField,
    },
}

impl Operand {
    fn resolve(&self, record: &CampaignRecord) -> Decimal {
        match self {
            Operand::Field(field) => record.value(*field),
            Operand::Difference {
                minuend,
                subtrahend,
            } => record.value(*minuend).saturating_sub(record.value(*subtrahend)),
        }
    }
}

/// A derived metric: its formula over record fields and its zero-division policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDefinition {
    pub name: String,
    pub numerator: Operand,
    pub denominator: Option<RecordField>,
    /// Multiplier applied to the quotient (100 for percentages).
    pub scale: Decimal,
    /// Value returned when the denominator is zero, missing or negative.
    pub edge_case: Option<Decimal>,
    pub unit: Unit,
    pub polarity: Polarity,
}

impl MetricDefinition {
    /// A metric with no denominator, such as profit.
    pub fn amount(name: impl Into<String>, numerator: Operand, unit: Unit, polarity: Polarity) -> Self {
        Self {
            name: name.into(),
            numerator,
            denominator: None,
            scale: Decimal::ONE,
            edge_case: None,
            unit,
            polarity,
        }
    }

    /// `numerator / denominator`. An edge-case value must still be declared.
    pub fn ratio(
        name: impl Into<String>,
        numerator: Operand,
        denominator: RecordField,
        unit: Unit,
        polarity: Polarity,
    ) -> Self {
        Self {
            name: name.into(),
            numerator,
            denominator: Some(denominator),
            scale: Decimal::ONE,
            edge_case: None,
            unit,
            polarity,
        }
    }

    /// `numerator / denominator * 100`. An edge-case value must still be declared.
    pub fn percentage(
        name: impl Into<String>,
        numerator: Operand,
        denominator: RecordField,
        polarity: Polarity,
    ) -> Self {
        Self {
            scale: HUNDRED,
            ..Self::ratio(name, numerator, denominator, Unit::Percentage, polarity)
        }
    }

    pub fn with_edge_case(mut self, value: Decimal) -> Self {
        self.edge_case = Some(value);
        self
    }

    /// Returns true when evaluating against `record` falls back to the edge-case value.
    pub fn hits_edge_case(&self, record: &CampaignRecord) -> bool {
        self.denominator
            .is_some_and(|field| record.value(field) <= Decimal::ZERO)
    }

    /// Evaluates the formula against one record.
    ///
    /// Results beyond the Decimal range saturate at `Decimal::MAX` or `Decimal::MIN`.
    pub fn evaluate(&self, record: &CampaignRecord) -> Decimal {
        let numerator = self.numerator.resolve(record);
        let quotient = match self.denominator {
            None => Some(numerator),
            Some(field) => {
                let denominator = record.value(field);
                if denominator <= Decimal::ZERO {
                    // The registry refuses definitions without a policy, so this is always set.
                    return self.edge_case.unwrap_or(Decimal::ZERO);
                }
                numerator.checked_div(denominator)
            }
        };

        match quotient.and_then(|q| q.checked_mul(self.scale)) {
            Some(value) => value,
            None => {
                tracing::warn!(metric = %self.name, %numerator, "Metric overflowed; saturating");
                overflow_bound(numerator.is_sign_negative() != self.scale.is_sign_negative())
            }
        }
    }
}

/// The set of metrics every record is evaluated against, in declaration order.
#[derive(Debug, Clone)]
pub struct MetricRegistry {
    definitions: Vec<MetricDefinition>,
    index: HashMap<String, usize>,
}

impl MetricRegistry {
    /// Builds a registry, rejecting any dividing formula without an edge-case
    /// policy and any duplicated name.
    pub fn new(definitions: Vec<MetricDefinition>) -> Result<Self, MetricsError> {
        let mut index = HashMap::with_capacity(definitions.len());

        for (position, definition) in definitions.iter().enumerate() {
            if let (Some(denominator), None) = (definition.denominator, definition.edge_case) {
                return Err(MetricsError::MissingEdgeCasePolicy {
                    metric: definition.name.clone(),
                    denominator,
                });
            }
            if index.insert(definition.name.clone(), position).is_some() {
                return Err(MetricsError::DuplicateMetric(definition.name.clone()));
            }
        }

        Ok(Self { definitions, index })
    }

    /// The standard campaign metric set. Every ratio falls back to zero.
    pub fn standard() -> Self {
        let definitions = standard_definitions();
        let index = definitions
            .iter()
            .enumerate()
            .map(|(position, d)| (d.name.clone(), position))
            .collect();
        Self { definitions, index }
    }

    pub fn lookup(&self, name: &str) -> Result<&MetricDefinition, MetricsError> {
        self.index
            .get(name)
            .map(|&position| &self.definitions[position])
            .ok_or_else(|| MetricsError::UnknownMetric(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn definitions(&self) -> &[MetricDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

pub fn standard_definitions() -> Vec<MetricDefinition> {
    use names::*;
    use Polarity::{HigherIsBetter, LowerIsBetter};
    use RecordField::*;

    let profit = Operand::Difference {
        minuend: Revenue,
        subtrahend: Investment,
    };
    let zero = Decimal::ZERO;

    vec![
        MetricDefinition::percentage(ROI, profit, Investment, HigherIsBetter).with_edge_case(zero),
        MetricDefinition::amount(PROFIT, profit, Unit::Currency, HigherIsBetter),
        MetricDefinition::percentage(PROFIT_MARGIN, profit, Revenue, HigherIsBetter)
            .with_edge_case(zero),
        MetricDefinition::ratio(ROAS, Operand::Field(Revenue), Investment, Unit::Ratio, HigherIsBetter)
            .with_edge_case(zero),
        MetricDefinition::ratio(CAC, Operand::Field(Investment), NewCustomers, Unit::Currency, LowerIsBetter)
            .with_edge_case(zero),
        MetricDefinition::ratio(
            REVENUE_PER_CUSTOMER,
            Operand::Field(Revenue),
            NewCustomers,
            Unit::Currency,
            HigherIsBetter,
        )
        .with_edge_case(zero),
        MetricDefinition::percentage(ENGAGEMENT_RATE, Operand::Field(Engagements), Impressions, HigherIsBetter)
            .with_edge_case(zero),
        MetricDefinition::percentage(CTR, Operand::Field(Clicks), Impressions, HigherIsBetter)
            .with_edge_case(zero),
        MetricDefinition::percentage(CVR, Operand::Field(Conversions), Clicks, HigherIsBetter)
            .with_edge_case(zero),
        MetricDefinition::ratio(CPC, Operand::Field(Investment), Clicks, Unit::Currency, LowerIsBetter)
            .with_edge_case(zero),
        MetricDefinition::ratio(CPA, Operand::Field(Investment), Conversions, Unit::Currency, LowerIsBetter)
            .with_edge_case(zero),
    ]
}
