use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grade attached to a record's ROI.
///
/// Variants are declared from lowest to highest so that the derived `Ord`
/// ranks a better grade above a worse one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "F")]
    F,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A+")]
    APlus,
}

impl Grade {
    pub fn label(&self) -> &'static str {
        match self {
            Grade::F => "F",
            Grade::D => "D",
            Grade::C => "C",
            Grade::CPlus => "C+",
            Grade::BMinus => "B-",
            Grade::B => "B",
            Grade::BPlus => "B+",
            Grade::A => "A",
            Grade::APlus => "A+",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The unit a derived metric is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Percentage,
    Ratio,
    Currency,
}

/// Which direction of a metric counts as the better outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

impl Polarity {
    /// Returns true when moving from `average` to `value` is an improvement.
    pub fn is_favorable<T: PartialOrd>(&self, value: T, average: T) -> bool {
        match self {
            Polarity::HigherIsBetter => value > average,
            Polarity::LowerIsBetter => value < average,
        }
    }
}

/// A numeric input field of a `CampaignRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    Investment,
    Revenue,
    AdSpend,
    CreativeCost,
    PlatformFee,
    NewCustomers,
    Impressions,
    Engagements,
    Clicks,
    Conversions,
}

impl RecordField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::Investment => "investment",
            RecordField::Revenue => "revenue",
            RecordField::AdSpend => "ad_spend",
            RecordField::CreativeCost => "creative_cost",
            RecordField::PlatformFee => "platform_fee",
            RecordField::NewCustomers => "new_customers",
            RecordField::Impressions => "impressions",
            RecordField::Engagements => "engagements",
            RecordField::Clicks => "clicks",
            RecordField::Conversions => "conversions",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
