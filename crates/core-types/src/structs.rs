use crate::enums::RecordField;
use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The caller-assigned identifier of a campaign (e.g. "C001").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(String);

impl CampaignId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One campaign's raw performance data.
///
/// Identity fields are required and checked when the record is built; numeric
/// fields are optional and read as zero when absent. Use [`CampaignRecord::is_complete`]
/// to find out whether any core numeric field was left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCampaignRecord")]
pub struct CampaignRecord {
    campaign_id: CampaignId,
    name: String,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    investment: Option<Decimal>,
    revenue: Option<Decimal>,
    ad_spend: Option<Decimal>,
    creative_cost: Option<Decimal>,
    platform_fee: Option<Decimal>,
    new_customers: Option<u64>,
    impressions: Option<u64>,
    engagements: Option<u64>,
    clicks: Option<u64>,
    conversions: Option<u64>,
}

/// Fields every metric formula draws from. A record missing any of these is
/// still computed, but flagged as incomplete.
const CORE_FIELDS: [RecordField; 7] = [
    RecordField::Investment,
    RecordField::Revenue,
    RecordField::NewCustomers,
    RecordField::Impressions,
    RecordField::Engagements,
    RecordField::Clicks,
    RecordField::Conversions,
];

impl CampaignRecord {
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> CampaignRecordBuilder {
        CampaignRecordBuilder::new(id, name)
    }

    pub fn id(&self) -> &CampaignId {
        &self.campaign_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// The supplied value of a numeric field, or `None` if it was never set.
    pub fn raw(&self, field: RecordField) -> Option<Decimal> {
        match field {
            RecordField::Investment => self.investment,
            RecordField::Revenue => self.revenue,
            RecordField::AdSpend => self.ad_spend,
            RecordField::CreativeCost => self.creative_cost,
            RecordField::PlatformFee => self.platform_fee,
            RecordField::NewCustomers => self.new_customers.map(Decimal::from),
            RecordField::Impressions => self.impressions.map(Decimal::from),
            RecordField::Engagements => self.engagements.map(Decimal::from),
            RecordField::Clicks => self.clicks.map(Decimal::from),
            RecordField::Conversions => self.conversions.map(Decimal::from),
        }
    }

    /// The value of a numeric field for computation; absent fields read as zero.
    pub fn value(&self, field: RecordField) -> Decimal {
        self.raw(field).unwrap_or(Decimal::ZERO)
    }

    pub fn investment(&self) -> Decimal {
        self.value(RecordField::Investment)
    }

    pub fn revenue(&self) -> Decimal {
        self.value(RecordField::Revenue)
    }

    pub fn new_customers(&self) -> u64 {
        self.new_customers.unwrap_or(0)
    }

    /// Returns true when every core numeric field was supplied.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// The core numeric fields that were not supplied.
    pub fn missing_fields(&self) -> Vec<RecordField> {
        CORE_FIELDS
            .iter()
            .copied()
            .filter(|field| self.raw(*field).is_none())
            .collect()
    }
}

/// Builds a `CampaignRecord`, validating identity fields on `build`.
#[derive(Debug, Clone)]
pub struct CampaignRecordBuilder {
    raw: RawCampaignRecord,
}

impl CampaignRecordBuilder {
    fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            raw: RawCampaignRecord {
                campaign_id: id.into(),
                name: name.into(),
                ..RawCampaignRecord::default()
            },
        }
    }

    pub fn dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.raw.start_date = Some(start);
        self.raw.end_date = Some(end);
        self
    }

    pub fn investment(mut self, value: Decimal) -> Self {
        self.raw.investment = Some(value);
        self
    }

    pub fn revenue(mut self, value: Decimal) -> Self {
        self.raw.revenue = Some(value);
        self
    }

    pub fn ad_spend(mut self, value: Decimal) -> Self {
        self.raw.ad_spend = Some(value);
        self
    }

    pub fn creative_cost(mut self, value: Decimal) -> Self {
        self.raw.creative_cost = Some(value);
        self
    }

    pub fn platform_fee(mut self, value: Decimal) -> Self {
        self.raw.platform_fee = Some(value);
        self
    }

    pub fn new_customers(mut self, value: u64) -> Self {
        self.raw.new_customers = Some(value);
        self
    }

    pub fn impressions(mut self, value: u64) -> Self {
        self.raw.impressions = Some(value);
        self
    }

    pub fn engagements(mut self, value: u64) -> Self {
        self.raw.engagements = Some(value);
        self
    }

    pub fn clicks(mut self, value: u64) -> Self {
        self.raw.clicks = Some(value);
        self
    }

    pub fn conversions(mut self, value: u64) -> Self {
        self.raw.conversions = Some(value);
        self
    }

    pub fn build(self) -> Result<CampaignRecord, CoreError> {
        CampaignRecord::try_from(self.raw)
    }
}

/// The unvalidated wire shape of a record, as a loader would produce it.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawCampaignRecord {
    #[serde(default)]
    campaign_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    investment: Option<Decimal>,
    #[serde(default)]
    revenue: Option<Decimal>,
    #[serde(default)]
    ad_spend: Option<Decimal>,
    #[serde(default)]
    creative_cost: Option<Decimal>,
    #[serde(default)]
    platform_fee: Option<Decimal>,
    #[serde(default)]
    new_customers: Option<u64>,
    #[serde(default)]
    impressions: Option<u64>,
    #[serde(default)]
    engagements: Option<u64>,
    #[serde(default)]
    clicks: Option<u64>,
    #[serde(default)]
    conversions: Option<u64>,
}

impl TryFrom<RawCampaignRecord> for CampaignRecord {
    type Error = CoreError;

    fn try_from(raw: RawCampaignRecord) -> Result<Self, Self::Error> {
        let campaign_id = raw.campaign_id.trim().to_string();
        if campaign_id.is_empty() {
            return Err(CoreError::validation("campaign_id", "must not be empty"));
        }
        let name = raw.name.trim().to_string();
        if name.is_empty() {
            return Err(CoreError::validation(
                "name",
                format!("must not be empty (campaign '{}')", campaign_id),
            ));
        }
        if let (Some(start), Some(end)) = (raw.start_date, raw.end_date) {
            if end < start {
                return Err(CoreError::validation(
                    "end_date",
                    format!("{} is before start_date {}", end, start),
                ));
            }
        }

        Ok(CampaignRecord {
            campaign_id: CampaignId(campaign_id),
            name,
            start_date: raw.start_date,
            end_date: raw.end_date,
            investment: raw.investment,
            revenue: raw.revenue,
            ad_spend: raw.ad_spend,
            creative_cost: raw.creative_cost,
            platform_fee: raw.platform_fee,
            new_customers: raw.new_customers,
            impressions: raw.impressions,
            engagements: raw.engagements,
            clicks: raw.clicks,
            conversions: raw.conversions,
        })
    }
}

/// An investor's stake, valued at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentPosition {
    pub initial_investment: Decimal,
    pub current_value: Decimal,
    /// Holding period in years; fractional periods are allowed.
    pub period_years: Decimal,
}
