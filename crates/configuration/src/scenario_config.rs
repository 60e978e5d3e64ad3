use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Days used to turn a daily unlock cap into a monthly one.
pub const DAYS_PER_MONTH: Decimal = dec!(30);

/// The full set of knobs one scenario of the reward economy is evaluated with.
///
/// Percentages carry a `_pct` suffix and are expressed on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssumptionSet {
    // Pricing
    pub bag_retail_price: Decimal,
    pub bags_sold_per_month: Decimal,

    // Ad economics (per verified view)
    pub cpv_brand_pays: Decimal,
    pub cash_credit_per_view: Decimal,
    pub reward_points_per_view: Decimal,
    pub platform_margin_per_view: Decimal,

    // Engagement
    pub active_user_rate_pct: Decimal,
    pub avg_monthly_ad_views: Decimal,
    pub avg_ads_to_recover_bag: Decimal,

    // Tiers
    pub tiers: Vec<TierDefinition>,

    // Store & redemption
    pub reward_redemption_rate_pct: Decimal,
    pub repeat_visit_increase_pct: Decimal,
    pub basket_size_uplift_pct: Decimal,
    pub avg_basket_value: Decimal,

    // Investor unit economics
    pub user_acquisition_cost: Decimal,
    pub user_lifetime_months: Decimal,

    // Growth
    pub bag_sales_growth_quarterly_pct: Decimal,
    pub initial_brands_enrolled: Decimal,
    pub brand_growth_quarterly_pct: Decimal,
    pub base_fill_rate: Decimal,
    pub fill_rate_ceiling: Decimal,
    pub fill_rate_gain_per_brand_multiple: Decimal,
}

impl Default for AssumptionSet {
    fn default() -> Self {
        Self {
            bag_retail_price: dec!(0.40),
            bags_sold_per_month: dec!(10000),
            cpv_brand_pays: dec!(0.25),
            cash_credit_per_view: dec!(0.08),
            reward_points_per_view: dec!(0.08),
            platform_margin_per_view: dec!(0.09),
            active_user_rate_pct: dec!(100),
            avg_monthly_ad_views: dec!(12),
            avg_ads_to_recover_bag: dec!(3),
            tiers: TierDefinition::standard_tiers(),
            reward_redemption_rate_pct: dec!(75),
            repeat_visit_increase_pct: dec!(15),
            basket_size_uplift_pct: dec!(8),
            avg_basket_value: dec!(25.00),
            user_acquisition_cost: dec!(2.00),
            user_lifetime_months: dec!(12),
            bag_sales_growth_quarterly_pct: dec!(15),
            initial_brands_enrolled: dec!(10),
            brand_growth_quarterly_pct: dec!(25),
            base_fill_rate: dec!(0.85),
            fill_rate_ceiling: dec!(0.95),
            fill_rate_gain_per_brand_multiple: dec!(0.08),
        }
    }
}

/// A population segment with its own monthly cash-credit unlock cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierDefinition {
    pub name: String,
    pub cap: UnlockCap,
    /// Fraction of users in this tier (0.0 - 1.0).
    pub share: Decimal,
}

impl TierDefinition {
    pub fn new(name: impl Into<String>, cap: UnlockCap, share: Decimal) -> Self {
        Self {
            name: name.into(),
            cap,
            share,
        }
    }

    /// Bronze / Silver / Gold / Platinum with a 60/25/12/3 population split.
    pub fn standard_tiers() -> Vec<TierDefinition> {
        vec![
            TierDefinition::new("Bronze", UnlockCap::BagValues(dec!(1)), dec!(0.60)),
            TierDefinition::new("Silver", UnlockCap::BagValues(dec!(3)), dec!(0.25)),
            TierDefinition::new("Gold", UnlockCap::BagValues(dec!(7)), dec!(0.12)),
            TierDefinition::new("Platinum", UnlockCap::DailyCurrency(dec!(1.00)), dec!(0.03)),
        ]
    }
}

/// How a tier's monthly unlock cap is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockCap {
    /// A number of bag values per month.
    BagValues(Decimal),
    /// An absolute currency amount per month.
    Currency(Decimal),
    /// An absolute currency amount per day.
    DailyCurrency(Decimal),
}

impl UnlockCap {
    /// Resolves the cap to a monthly currency amount.
    pub fn monthly_amount(&self, bag_retail_price: Decimal) -> Decimal {
        match self {
            UnlockCap::BagValues(bags) => *bags * bag_retail_price,
            UnlockCap::Currency(amount) => *amount,
            UnlockCap::DailyCurrency(amount) => *amount * DAYS_PER_MONTH,
        }
    }
}

/// A named override subset applied on top of a base `AssumptionSet`.
///
/// Unset fields keep the base value. Tier shares and caps are overridden by tier name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioDelta {
    pub bag_retail_price: Option<Decimal>,
    pub bags_sold_per_month: Option<Decimal>,
    pub cpv_brand_pays: Option<Decimal>,
    pub cash_credit_per_view: Option<Decimal>,
    pub reward_points_per_view: Option<Decimal>,
    pub platform_margin_per_view: Option<Decimal>,
    pub active_user_rate_pct: Option<Decimal>,
    pub avg_monthly_ad_views: Option<Decimal>,
    pub avg_ads_to_recover_bag: Option<Decimal>,
    pub reward_redemption_rate_pct: Option<Decimal>,
    pub repeat_visit_increase_pct: Option<Decimal>,
    pub basket_size_uplift_pct: Option<Decimal>,
    pub avg_basket_value: Option<Decimal>,
    pub user_acquisition_cost: Option<Decimal>,
    pub user_lifetime_months: Option<Decimal>,
    pub bag_sales_growth_quarterly_pct: Option<Decimal>,
    pub initial_brands_enrolled: Option<Decimal>,
    pub brand_growth_quarterly_pct: Option<Decimal>,
    pub base_fill_rate: Option<Decimal>,
    pub fill_rate_ceiling: Option<Decimal>,
    pub fill_rate_gain_per_brand_multiple: Option<Decimal>,
    pub tier_shares: BTreeMap<String, Decimal>,
    pub tier_caps: BTreeMap<String, UnlockCap>,
}

impl ScenarioDelta {
    pub fn is_empty(&self) -> bool {
        *self == ScenarioDelta::default()
    }

    fn shares(pairs: &[(&str, Decimal)]) -> BTreeMap<String, Decimal> {
        pairs
            .iter()
            .map(|(name, share)| (name.to_string(), *share))
            .collect()
    }

    /// High engagement, a richer tier mix and stronger store response.
    pub fn optimistic() -> Self {
        Self {
            avg_monthly_ad_views: Some(dec!(20)),
            reward_redemption_rate_pct: Some(dec!(85)),
            repeat_visit_increase_pct: Some(dec!(25)),
            basket_size_uplift_pct: Some(dec!(15)),
            tier_shares: Self::shares(&[
                ("Bronze", dec!(0.47)),
                ("Silver", dec!(0.25)),
                ("Gold", dec!(0.20)),
                ("Platinum", dec!(0.08)),
            ]),
            ..Self::default()
        }
    }

    /// Somewhat weaker engagement than the base case.
    pub fn conservative() -> Self {
        Self {
            avg_monthly_ad_views: Some(dec!(8)),
            reward_redemption_rate_pct: Some(dec!(65)),
            repeat_visit_increase_pct: Some(dec!(10)),
            basket_size_uplift_pct: Some(dec!(5)),
            tier_shares: Self::shares(&[
                ("Bronze", dec!(0.65)),
                ("Silver", dec!(0.25)),
                ("Gold", dec!(0.08)),
                ("Platinum", dec!(0.02)),
            ]),
            ..Self::default()
        }
    }

    /// Low engagement, few premium users and weak store response.
    pub fn pessimistic() -> Self {
        Self {
            avg_monthly_ad_views: Some(dec!(6)),
            reward_redemption_rate_pct: Some(dec!(50)),
            repeat_visit_increase_pct: Some(dec!(8)),
            basket_size_uplift_pct: Some(dec!(3)),
            tier_shares: Self::shares(&[
                ("Bronze", dec!(0.69)),
                ("Silver", dec!(0.25)),
                ("Gold", dec!(0.05)),
                ("Platinum", dec!(0.01)),
            ]),
            ..Self::default()
        }
    }
}

/// One named scenario of a set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedScenario {
    pub name: String,
    #[serde(default)]
    pub delta: ScenarioDelta,
}

impl NamedScenario {
    pub fn new(name: impl Into<String>, delta: ScenarioDelta) -> Self {
        Self {
            name: name.into(),
            delta,
        }
    }
}

/// A base assumption set and the scenarios derived from it, in evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioSet {
    pub base: AssumptionSet,
    pub scenarios: Vec<NamedScenario>,
}

impl ScenarioSet {
    pub fn best_base_worst() -> Self {
        Self {
            base: AssumptionSet::default(),
            scenarios: vec![
                NamedScenario::new("worst", ScenarioDelta::pessimistic()),
                NamedScenario::new("base", ScenarioDelta::default()),
                NamedScenario::new("best", ScenarioDelta::optimistic()),
            ],
        }
    }

    pub fn conservative_moderate_optimistic() -> Self {
        Self {
            base: AssumptionSet::default(),
            scenarios: vec![
                NamedScenario::new("conservative", ScenarioDelta::conservative()),
                NamedScenario::new("moderate", ScenarioDelta::default()),
                NamedScenario::new("optimistic", ScenarioDelta::optimistic()),
            ],
        }
    }
}

impl Default for ScenarioSet {
    fn default() -> Self {
        Self::best_base_worst()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_per_view_split_adds_up_to_cpv() {
        let a = AssumptionSet::default();
        assert_eq!(
            a.cash_credit_per_view + a.reward_points_per_view + a.platform_margin_per_view,
            a.cpv_brand_pays
        );
    }

    #[test]
    fn preset_tier_mixes_sum_to_one() {
        for delta in [
            ScenarioDelta::optimistic(),
            ScenarioDelta::conservative(),
            ScenarioDelta::pessimistic(),
        ] {
            let total: Decimal = delta.tier_shares.values().sum();
            assert_eq!(total, Decimal::ONE);
        }
        let total: Decimal = TierDefinition::standard_tiers().iter().map(|t| t.share).sum();
        assert_eq!(total, Decimal::ONE);
    }

    #[test]
    fn unlock_caps_resolve_to_monthly_amounts() {
        let price = dec!(0.40);
        assert_eq!(UnlockCap::BagValues(dec!(3)).monthly_amount(price), dec!(1.20));
        assert_eq!(UnlockCap::Currency(dec!(5)).monthly_amount(price), dec!(5));
        assert_eq!(UnlockCap::DailyCurrency(dec!(1.00)).monthly_amount(price), dec!(30));
    }
}
