//! Funnel projections for paid channels.
//!
//! A plan turns a budget and benchmark rates into projected impressions,
//! engagements and conversions. Funnel counts are floored to whole units.
//! The projection converts into a `CampaignRecord` so channels can be compared
//! with real campaigns.

use crate::formula::{apply_pct, guarded_ratio};
use core_types::{CampaignRecord, CoreError};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    DigitalAds,
    Flyer,
}

/// A paid social/search campaign priced per thousand impressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigitalAdsPlan {
    pub budget: Decimal,
    pub cpm: Decimal,
    pub ctr_pct: Decimal,
    pub conversion_rate_pct: Decimal,
    pub avg_revenue_per_conversion: Decimal,
}

impl Default for DigitalAdsPlan {
    fn default() -> Self {
        Self {
            budget: Decimal::ZERO,
            cpm: dec!(10.00),
            ctr_pct: dec!(1.0),
            conversion_rate_pct: dec!(2.5),
            avg_revenue_per_conversion: Decimal::ZERO,
        }
    }
}

/// A printed flyer drop priced per piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyerPlan {
    pub num_flyers: u64,
    pub print_cost_per_flyer: Decimal,
    pub distribution_cost_per_flyer: Decimal,
    pub response_rate_pct: Decimal,
    /// Share of responses that turn into a sale.
    pub conversion_rate_pct: Decimal,
    pub avg_revenue_per_conversion: Decimal,
}

impl Default for FlyerPlan {
    fn default() -> Self {
        Self {
            num_flyers: 0,
            print_cost_per_flyer: dec!(0.12),
            distribution_cost_per_flyer: dec!(0.10),
            response_rate_pct: dec!(0.8),
            conversion_rate_pct: dec!(10.0),
            avg_revenue_per_conversion: Decimal::ZERO,
        }
    }
}

/// The projected funnel of one channel plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelProjection {
    pub channel: Channel,
    /// Media cost (digital budget, or flyer distribution).
    pub media_cost: Decimal,
    /// Production cost (flyer printing; zero for digital).
    pub production_cost: Decimal,
    pub total_cost: Decimal,
    pub impressions: u64,
    /// Clicks for digital, responses for flyers.
    pub engagements: u64,
    pub conversions: u64,
    pub sales: Decimal,
    pub cost_per_impression: Decimal,
    pub cost_per_engagement: Decimal,
    pub cost_per_conversion: Decimal,
}

impl ChannelProjection {
    /// Converts the projection into a record; every conversion counts as a new customer.
    pub fn to_record(&self, id: impl Into<String>, name: impl Into<String>) -> Result<CampaignRecord, CoreError> {
        CampaignRecord::builder(id, name)
            .investment(self.total_cost)
            .revenue(self.sales)
            .ad_spend(self.media_cost)
            .creative_cost(self.production_cost)
            .new_customers(self.conversions)
            .impressions(self.impressions)
            .engagements(self.engagements)
            .clicks(self.engagements)
            .conversions(self.conversions)
            .build()
    }
}

impl DigitalAdsPlan {
    pub fn with_budget(budget: Decimal, avg_revenue_per_conversion: Decimal) -> Self {
        Self {
            budget,
            avg_revenue_per_conversion,
            ..Self::default()
        }
    }

    pub fn project(&self) -> ChannelProjection {
        let impressions = floor_count(guarded_ratio(self.budget, self.cpm, Decimal::ZERO) * dec!(1000));
        let clicks = floor_count(apply_pct(Decimal::from(impressions), self.ctr_pct));
        let conversions = floor_count(apply_pct(Decimal::from(clicks), self.conversion_rate_pct));
        let sales = Decimal::from(conversions) * self.avg_revenue_per_conversion;

        tracing::debug!(impressions, clicks, conversions, %sales, "Digital ads funnel projected");

        project(Channel::DigitalAds, self.budget, Decimal::ZERO, impressions, clicks, conversions, sales)
    }
}

impl FlyerPlan {
    pub fn with_volume(num_flyers: u64, avg_revenue_per_conversion: Decimal) -> Self {
        Self {
            num_flyers,
            avg_revenue_per_conversion,
            ..Self::default()
        }
    }

    pub fn project(&self) -> ChannelProjection {
        let flyers = Decimal::from(self.num_flyers);
        let print_cost = flyers * self.print_cost_per_flyer;
        let distribution_cost = flyers * self.distribution_cost_per_flyer;
        let responses = floor_count(apply_pct(flyers, self.response_rate_pct));
        let conversions = floor_count(apply_pct(Decimal::from(responses), self.conversion_rate_pct));
        let sales = Decimal::from(conversions) * self.avg_revenue_per_conversion;

        tracing::debug!(responses, conversions, %sales, "Flyer funnel projected");

        project(
            Channel::Flyer,
            distribution_cost,
            print_cost,
            self.num_flyers,
            responses,
            conversions,
            sales,
        )
    }
}

fn project(
    channel: Channel,
    media_cost: Decimal,
    production_cost: Decimal,
    impressions: u64,
    engagements: u64,
    conversions: u64,
    sales: Decimal,
) -> ChannelProjection {
    let total_cost = media_cost + production_cost;
    ChannelProjection {
        channel,
        media_cost,
        production_cost,
        total_cost,
        impressions,
        engagements,
        conversions,
        sales,
        cost_per_impression: guarded_ratio(total_cost, Decimal::from(impressions), Decimal::ZERO),
        cost_per_engagement: guarded_ratio(total_cost, Decimal::from(engagements), Decimal::ZERO),
        cost_per_conversion: guarded_ratio(total_cost, Decimal::from(conversions), Decimal::ZERO),
    }
}

fn floor_count(value: Decimal) -> u64 {
    value.floor().to_u64().unwrap_or(0)
}
