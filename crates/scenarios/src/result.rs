use crate::growth::GrowthProjection;
use configuration::AssumptionSet;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The capped monthly cash payout of one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierPayout {
    pub name: String,
    pub share: Decimal,
    pub monthly_cap: Decimal,
    /// `min(raw accrual, monthly_cap)`.
    pub capped_payout: Decimal,
    /// Views a user of this tier can be credited for before reaching the cap.
    pub max_monthly_views: u64,
    /// True when raw accrual exceeds the cap.
    pub capped: bool,
}

/// Monthly economics of one average active user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerUserEconomics {
    pub monthly_views: Decimal,
    pub brand_spend_per_user: Decimal,
    /// Cash credit a user would accrue with no cap.
    pub raw_cash_accrual: Decimal,
    pub tiers: Vec<TierPayout>,
    /// Share-weighted average of the capped tier payouts.
    pub blended_cash_payout: Decimal,
    pub reward_points_per_user: Decimal,
    pub total_user_rewards: Decimal,
    pub platform_margin_per_user: Decimal,
    /// Platform margin as a share of brand spend.
    pub margin_pct: Decimal,
    /// Whether credit, points and margin per view add up to the CPV (within a cent).
    pub economics_balanced: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub bags_sold: Decimal,
    pub bag_revenue: Decimal,
    pub active_users: Decimal,
    pub total_ad_views: Decimal,
    pub ad_revenue: Decimal,
    pub total_revenue: Decimal,
    pub cash_credits_paid: Decimal,
    pub reward_points_issued: Decimal,
    pub total_user_rewards: Decimal,
    /// Ad revenue left after rewards.
    pub gross_margin: Decimal,
    /// Bag revenue plus gross margin.
    pub total_margin: Decimal,
    pub margin_pct: Decimal,
    pub revenue_per_bag: Decimal,
    pub margin_per_bag: Decimal,
}

/// Economics of one bag over the views it takes to recover its price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerBagEconomics {
    pub views_per_bag: Decimal,
    pub bag_retail_revenue: Decimal,
    pub brand_revenue_per_bag: Decimal,
    pub user_earnings_per_bag: Decimal,
    /// Bag price less the user's earnings on it; zero or below means the bag is free.
    pub user_net_cost: Decimal,
    pub platform_margin_per_bag: Decimal,
    pub total_revenue_per_bag: Decimal,
    pub net_margin_per_bag: Decimal,
}

/// Value the reward program drives into partner stores each month.
///
/// The three components are additive and exposed separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreValue {
    pub reward_redemption_value: Decimal,
    pub baseline_basket_value: Decimal,
    pub incremental_uplift_value: Decimal,
    pub total_store_value: Decimal,
    pub estimated_transactions: Decimal,
    pub repeat_visit_increase: Decimal,
}

/// The internal model measured against one external ad platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    pub platform: String,
    pub cpm: Decimal,
    pub ctr_pct: Decimal,
    pub raw_cost_per_impression: Decimal,
    /// Cost per impression divided by the click-through rate.
    pub true_cost_per_engagement: Decimal,
    /// How much cheaper an internal engagement is than the platform's true cost.
    pub savings_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandCostComparison {
    /// Every internal view is a verified engagement, so this is the CPV.
    pub internal_cost_per_engagement: Decimal,
    pub internal_cpm: Decimal,
    pub benchmarks: Vec<BenchmarkComparison>,
    pub total_brand_spend: Decimal,
    pub cost_per_basket_influenced: Decimal,
}

/// Lifetime value against acquisition cost for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestorUnitEconomics {
    pub user_acquisition_cost: Decimal,
    pub lifetime_months: Decimal,
    /// One bag per month over the lifetime.
    pub bag_ltv: Decimal,
    pub ad_ltv: Decimal,
    pub total_ltv: Decimal,
    pub ltv_cac_ratio: Decimal,
    pub monthly_margin_per_user: Decimal,
    pub payback_months: Decimal,
    pub contribution_margin_pct: Decimal,
}

/// Everything derived for one named scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub assumptions: AssumptionSet,
    pub per_user: PerUserEconomics,
    pub monthly: MonthlySummary,
    pub per_bag: PerBagEconomics,
    pub store_value: StoreValue,
    pub brand_cost: BrandCostComparison,
    pub investor: InvestorUnitEconomics,
    pub growth: GrowthProjection,
}
