use configuration::AssumptionSet;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single scalar assumption that can be swept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Knob {
    BagRetailPrice,
    BagsSoldPerMonth,
    CpvBrandPays,
    CashCreditPerView,
    RewardPointsPerView,
    PlatformMarginPerView,
    ActiveUserRatePct,
    AvgMonthlyAdViews,
    RewardRedemptionRatePct,
    BasketSizeUpliftPct,
    AvgBasketValue,
}

impl Knob {
    pub fn as_str(&self) -> &'static str {
        match self {
            Knob::BagRetailPrice => "bag_retail_price",
            Knob::BagsSoldPerMonth => "bags_sold_per_month",
            Knob::CpvBrandPays => "cpv_brand_pays",
            Knob::CashCreditPerView => "cash_credit_per_view",
            Knob::RewardPointsPerView => "reward_points_per_view",
            Knob::PlatformMarginPerView => "platform_margin_per_view",
            Knob::ActiveUserRatePct => "active_user_rate_pct",
            Knob::AvgMonthlyAdViews => "avg_monthly_ad_views",
            Knob::RewardRedemptionRatePct => "reward_redemption_rate_pct",
            Knob::BasketSizeUpliftPct => "basket_size_uplift_pct",
            Knob::AvgBasketValue => "avg_basket_value",
        }
    }

    fn slot<'a>(&self, a: &'a mut AssumptionSet) -> &'a mut Decimal {
        match self {
            Knob::BagRetailPrice => &mut a.bag_retail_price,
            Knob::BagsSoldPerMonth => &mut a.bags_sold_per_month,
            Knob::CpvBrandPays => &mut a.cpv_brand_pays,
            Knob::CashCreditPerView => &mut a.cash_credit_per_view,
            Knob::RewardPointsPerView => &mut a.reward_points_per_view,
            Knob::PlatformMarginPerView => &mut a.platform_margin_per_view,
            Knob::ActiveUserRatePct => &mut a.active_user_rate_pct,
            Knob::AvgMonthlyAdViews => &mut a.avg_monthly_ad_views,
            Knob::RewardRedemptionRatePct => &mut a.reward_redemption_rate_pct,
            Knob::BasketSizeUpliftPct => &mut a.basket_size_uplift_pct,
            Knob::AvgBasketValue => &mut a.avg_basket_value,
        }
    }

    /// Returns a copy of `base` with this knob set to `value`.
    pub fn apply(&self, base: &AssumptionSet, value: Decimal) -> AssumptionSet {
        let mut assumptions = base.clone();
        *self.slot(&mut assumptions) = value;
        assumptions
    }
}

impl fmt::Display for Knob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Headline outputs at one value of the swept knob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub value: Decimal,
    pub total_revenue: Decimal,
    pub total_margin: Decimal,
    pub margin_pct: Decimal,
    pub user_rewards_per_user: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn apply_leaves_the_base_untouched() {
        let base = AssumptionSet::default();
        let swept = Knob::AvgMonthlyAdViews.apply(&base, dec!(30));
        assert_eq!(swept.avg_monthly_ad_views, dec!(30));
        assert_eq!(base.avg_monthly_ad_views, dec!(12));
        assert_eq!(swept.cpv_brand_pays, base.cpv_brand_pays);
    }

    #[test]
    fn knob_names_match_assumption_fields() {
        let json = serde_json::to_value(Knob::RewardRedemptionRatePct).unwrap();
        assert_eq!(json, Knob::RewardRedemptionRatePct.as_str());
    }
}
