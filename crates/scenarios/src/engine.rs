use crate::economics;
use crate::error::ScenarioError;
use crate::growth::project_growth;
use crate::result::ScenarioResult;
use crate::sensitivity::{Knob, SensitivityPoint};
use configuration::{AssumptionSet, BenchmarkSet, ScenarioDelta, ScenarioSet, TierDefinition};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Allowed distance of the tier share total from 1.0.
pub const SHARE_TOLERANCE: Decimal = dec!(0.000001);

/// Copies every `Some` field of the delta onto the assumptions.
macro_rules! apply_overrides {
    ($assumptions:expr, $delta:expr, [$($field:ident),+ $(,)?]) => {
        $(
            if let Some(value) = $delta.$field {
                $assumptions.$field = value;
            }
        )+
    };
}

/// Evaluates the tiered reward economy for named scenarios.
///
/// The engine is stateless apart from the external benchmarks it compares
/// brand costs against; every call works on its own copy of the assumptions.
#[derive(Debug, Clone, Default)]
pub struct ScenarioEngine {
    benchmarks: BenchmarkSet,
}

impl ScenarioEngine {
    pub fn new(benchmarks: BenchmarkSet) -> Self {
        Self { benchmarks }
    }

    pub fn benchmarks(&self) -> &BenchmarkSet {
        &self.benchmarks
    }

    /// Applies `delta` on top of `base` and validates the resolved set.
    ///
    /// Tier share overrides match tier names case-insensitively.
    pub fn resolve(&self, base: &AssumptionSet, delta: &ScenarioDelta) -> Result<AssumptionSet, ScenarioError> {
        let mut resolved = base.clone();

        apply_overrides!(resolved, delta, [
            bag_retail_price,
            bags_sold_per_month,
            cpv_brand_pays,
            cash_credit_per_view,
            reward_points_per_view,
            platform_margin_per_view,
            active_user_rate_pct,
            avg_monthly_ad_views,
            avg_ads_to_recover_bag,
            reward_redemption_rate_pct,
            repeat_visit_increase_pct,
            basket_size_uplift_pct,
            avg_basket_value,
            user_acquisition_cost,
            user_lifetime_months,
            bag_sales_growth_quarterly_pct,
            initial_brands_enrolled,
            brand_growth_quarterly_pct,
            base_fill_rate,
            fill_rate_ceiling,
            fill_rate_gain_per_brand_multiple,
        ]);

        for (name, share) in &delta.tier_shares {
            tier_named(&mut resolved.tiers, name)?.share = *share;
        }
        for (name, cap) in &delta.tier_caps {
            tier_named(&mut resolved.tiers, name)?.cap = *cap;
        }

        validate(&resolved)?;
        Ok(resolved)
    }

    /// Derives the full result for one resolved assumption set.
    pub fn evaluate(&self, name: &str, assumptions: AssumptionSet) -> Result<ScenarioResult, ScenarioError> {
        validate(&assumptions)?;

        let per_user = economics::per_user(&assumptions);
        let monthly = economics::monthly_summary(&assumptions, &per_user);
        let per_bag = economics::per_bag(&assumptions);
        let store_value = economics::store_value(&assumptions, &monthly);
        let brand_cost = economics::brand_cost(&assumptions, &self.benchmarks, &monthly, &store_value);
        let investor = economics::investor(&assumptions, &per_user, &per_bag);
        let growth = project_growth(&assumptions, &monthly);

        if !per_user.economics_balanced {
            tracing::warn!(
                scenario = name,
                cpv = %assumptions.cpv_brand_pays,
                "Per-view credit, points and margin do not add up to the CPV"
            );
        }
        tracing::info!(
            scenario = name,
            revenue = %monthly.total_revenue,
            margin = %monthly.total_margin,
            "Scenario evaluated"
        );

        Ok(ScenarioResult {
            name: name.to_string(),
            assumptions,
            per_user,
            monthly,
            per_bag,
            store_value,
            brand_cost,
            investor,
            growth,
        })
    }

    /// Resolves and evaluates every scenario of the set, in declaration order.
    #[tracing::instrument(skip_all, fields(scenarios = set.scenarios.len()))]
    pub fn run(&self, set: &ScenarioSet) -> Result<Vec<ScenarioResult>, ScenarioError> {
        set.scenarios
            .iter()
            .map(|scenario| {
                let assumptions = self.resolve(&set.base, &scenario.delta)?;
                self.evaluate(&scenario.name, assumptions)
            })
            .collect()
    }

    /// Sweeps one knob over `values`, leaving `base` untouched.
    pub fn sensitivity(
        &self,
        base: &AssumptionSet,
        knob: Knob,
        values: &[Decimal],
    ) -> Result<Vec<SensitivityPoint>, ScenarioError> {
        validate(base)?;
        tracing::debug!(%knob, points = values.len(), "Running sensitivity sweep");

        values
            .iter()
            .map(|&value| -> Result<SensitivityPoint, ScenarioError> {
                let assumptions = knob.apply(base, value);
                validate_scalars(&assumptions)?;
                let per_user = economics::per_user(&assumptions);
                let monthly = economics::monthly_summary(&assumptions, &per_user);
                Ok(SensitivityPoint {
                    value,
                    total_revenue: monthly.total_revenue,
                    total_margin: monthly.total_margin,
                    margin_pct: monthly.margin_pct,
                    user_rewards_per_user: per_user.total_user_rewards,
                })
            })
            .collect()
    }
}

fn tier_named<'a>(tiers: &'a mut [TierDefinition], name: &str) -> Result<&'a mut TierDefinition, ScenarioError> {
    tiers
        .iter_mut()
        .find(|tier| tier.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ScenarioError::UnknownTier(name.to_string()))
}

/// Checks the tier distribution and the scalar knobs of a resolved set.
pub fn validate(a: &AssumptionSet) -> Result<(), ScenarioError> {
    validate_tiers(a)?;
    validate_scalars(a)
}

fn validate_tiers(a: &AssumptionSet) -> Result<(), ScenarioError> {
    let total: Decimal = a.tiers.iter().map(|tier| tier.share).sum();
    let negative = a.tiers.iter().any(|tier| tier.share < Decimal::ZERO);

    if negative || (total - Decimal::ONE).abs() > SHARE_TOLERANCE {
        return Err(ScenarioError::InvalidTierDistribution { total });
    }
    if let Some(tier) = a
        .tiers
        .iter()
        .find(|tier| tier.cap.monthly_amount(a.bag_retail_price) < Decimal::ZERO)
    {
        return Err(ScenarioError::InvalidAssumption {
            field: "tiers.cap",
            reason: format!("'{}' has a negative unlock cap", tier.name),
        });
    }
    Ok(())
}

fn validate_scalars(a: &AssumptionSet) -> Result<(), ScenarioError> {
    let non_negative = [
        ("bag_retail_price", a.bag_retail_price),
        ("bags_sold_per_month", a.bags_sold_per_month),
        ("cpv_brand_pays", a.cpv_brand_pays),
        ("cash_credit_per_view", a.cash_credit_per_view),
        ("reward_points_per_view", a.reward_points_per_view),
        ("avg_monthly_ad_views", a.avg_monthly_ad_views),
        ("avg_ads_to_recover_bag", a.avg_ads_to_recover_bag),
        ("avg_basket_value", a.avg_basket_value),
        ("user_acquisition_cost", a.user_acquisition_cost),
        ("user_lifetime_months", a.user_lifetime_months),
        ("initial_brands_enrolled", a.initial_brands_enrolled),
        ("base_fill_rate", a.base_fill_rate),
        ("fill_rate_gain_per_brand_multiple", a.fill_rate_gain_per_brand_multiple),
    ];
    for (field, value) in non_negative {
        if value < Decimal::ZERO {
            return Err(ScenarioError::InvalidAssumption {
                field,
                reason: format!("must not be negative, got {}", value),
            });
        }
    }

    let rates = [
        ("active_user_rate_pct", a.active_user_rate_pct),
        ("reward_redemption_rate_pct", a.reward_redemption_rate_pct),
    ];
    for (field, value) in rates {
        if value < Decimal::ZERO || value > dec!(100) {
            return Err(ScenarioError::InvalidAssumption {
                field,
                reason: format!("must be between 0 and 100, got {}", value),
            });
        }
    }

    if a.fill_rate_ceiling < a.base_fill_rate {
        return Err(ScenarioError::InvalidAssumption {
            field: "fill_rate_ceiling",
            reason: format!("{} is below the base fill rate {}", a.fill_rate_ceiling, a.base_fill_rate),
        });
    }
    Ok(())
}
