//! Pure derivations of each part of a scenario result from resolved assumptions.
//!
//! Every division goes through the guarded primitives of `metrics::formula`,
//! so degenerate assumptions (no bags, no credit per view) produce zeros
//! instead of failures.

use crate::result::{
    BenchmarkComparison, BrandCostComparison, InvestorUnitEconomics, MonthlySummary,
    PerBagEconomics, PerUserEconomics, StoreValue, TierPayout,
};
use configuration::{AssumptionSet, BenchmarkSet};
use metrics::formula::{HUNDRED, apply_pct, guarded_ratio, percentage};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Largest gap between the per-view split and the CPV still considered balanced.
const BALANCE_TOLERANCE: Decimal = dec!(0.01);

const IMPRESSIONS_PER_MILLE: Decimal = dec!(1000);

pub fn per_user(a: &AssumptionSet) -> PerUserEconomics {
    let views = a.avg_monthly_ad_views;
    let raw_cash_accrual = views * a.cash_credit_per_view;

    let tiers: Vec<TierPayout> = a
        .tiers
        .iter()
        .map(|tier| {
            let monthly_cap = tier.cap.monthly_amount(a.bag_retail_price);
            let max_views = guarded_ratio(monthly_cap, a.cash_credit_per_view, Decimal::ZERO);
            TierPayout {
                name: tier.name.clone(),
                share: tier.share,
                monthly_cap,
                capped_payout: raw_cash_accrual.min(monthly_cap),
                max_monthly_views: max_views.floor().to_u64().unwrap_or(0),
                capped: raw_cash_accrual > monthly_cap,
            }
        })
        .collect();

    let blended_cash_payout: Decimal = tiers.iter().map(|t| t.share * t.capped_payout).sum();
    let brand_spend_per_user = views * a.cpv_brand_pays;
    let reward_points_per_user = views * a.reward_points_per_view;
    let total_user_rewards = blended_cash_payout + reward_points_per_user;
    let platform_margin_per_user = brand_spend_per_user - total_user_rewards;

    let per_view_split = a.cash_credit_per_view + a.reward_points_per_view + a.platform_margin_per_view;

    PerUserEconomics {
        monthly_views: views,
        brand_spend_per_user,
        raw_cash_accrual,
        tiers,
        blended_cash_payout,
        reward_points_per_user,
        total_user_rewards,
        platform_margin_per_user,
        margin_pct: percentage(platform_margin_per_user, brand_spend_per_user),
        economics_balanced: (per_view_split - a.cpv_brand_pays).abs() < BALANCE_TOLERANCE,
    }
}

pub fn monthly_summary(a: &AssumptionSet, per_user: &PerUserEconomics) -> MonthlySummary {
    let bags_sold = a.bags_sold_per_month;
    let bag_revenue = bags_sold * a.bag_retail_price;
    let active_users = apply_pct(bags_sold, a.active_user_rate_pct);
    let total_ad_views = active_users * a.avg_monthly_ad_views;
    let ad_revenue = total_ad_views * a.cpv_brand_pays;
    let total_revenue = bag_revenue + ad_revenue;

    let cash_credits_paid = active_users * per_user.blended_cash_payout;
    let reward_points_issued = total_ad_views * a.reward_points_per_view;
    let total_user_rewards = cash_credits_paid + reward_points_issued;
    let gross_margin = ad_revenue - total_user_rewards;
    let total_margin = bag_revenue + gross_margin;

    MonthlySummary {
        bags_sold,
        bag_revenue,
        active_users,
        total_ad_views,
        ad_revenue,
        total_revenue,
        cash_credits_paid,
        reward_points_issued,
        total_user_rewards,
        gross_margin,
        total_margin,
        margin_pct: percentage(total_margin, total_revenue),
        revenue_per_bag: guarded_ratio(total_revenue, bags_sold, Decimal::ZERO),
        margin_per_bag: guarded_ratio(total_margin, bags_sold, Decimal::ZERO),
    }
}

pub fn per_bag(a: &AssumptionSet) -> PerBagEconomics {
    let views = a.avg_ads_to_recover_bag;
    let brand_revenue_per_bag = views * a.cpv_brand_pays;
    let platform_margin_per_bag = views * a.platform_margin_per_view;
    let user_earnings_per_bag = views * (a.cash_credit_per_view + a.reward_points_per_view);

    PerBagEconomics {
        views_per_bag: views,
        bag_retail_revenue: a.bag_retail_price,
        brand_revenue_per_bag,
        user_earnings_per_bag,
        user_net_cost: a.bag_retail_price - user_earnings_per_bag,
        platform_margin_per_bag,
        total_revenue_per_bag: a.bag_retail_price + brand_revenue_per_bag,
        net_margin_per_bag: a.bag_retail_price + platform_margin_per_bag,
    }
}

pub fn store_value(a: &AssumptionSet, monthly: &MonthlySummary) -> StoreValue {
    let reward_redemption_value = apply_pct(monthly.total_user_rewards, a.reward_redemption_rate_pct);
    let estimated_transactions = apply_pct(monthly.active_users, a.reward_redemption_rate_pct);
    let baseline_basket_value = estimated_transactions * a.avg_basket_value;
    let incremental_uplift_value = apply_pct(baseline_basket_value, a.basket_size_uplift_pct);

    StoreValue {
        reward_redemption_value,
        baseline_basket_value,
        incremental_uplift_value,
        total_store_value: reward_redemption_value + baseline_basket_value + incremental_uplift_value,
        estimated_transactions,
        repeat_visit_increase: apply_pct(estimated_transactions, a.repeat_visit_increase_pct),
    }
}

pub fn brand_cost(
    a: &AssumptionSet,
    benchmarks: &BenchmarkSet,
    monthly: &MonthlySummary,
    store: &StoreValue,
) -> BrandCostComparison {
    let internal_cost_per_engagement = a.cpv_brand_pays;

    let compared = benchmarks
        .platforms
        .iter()
        .map(|platform| {
            let ctr_pct = platform.ctr_pct.unwrap_or(benchmarks.industry_ctr_pct);
            let raw_cost_per_impression = platform.cpm / IMPRESSIONS_PER_MILLE;
            let true_cost_per_engagement =
                guarded_ratio(raw_cost_per_impression, ctr_pct / HUNDRED, Decimal::ZERO);
            let savings_pct = percentage(
                true_cost_per_engagement - internal_cost_per_engagement,
                true_cost_per_engagement,
            );
            BenchmarkComparison {
                platform: platform.name.clone(),
                cpm: platform.cpm,
                ctr_pct,
                raw_cost_per_impression,
                true_cost_per_engagement,
                savings_pct,
            }
        })
        .collect();

    BrandCostComparison {
        internal_cost_per_engagement,
        internal_cpm: internal_cost_per_engagement * IMPRESSIONS_PER_MILLE,
        benchmarks: compared,
        total_brand_spend: monthly.ad_revenue,
        cost_per_basket_influenced: guarded_ratio(
            monthly.ad_revenue,
            store.estimated_transactions,
            Decimal::ZERO,
        ),
    }
}

pub fn investor(a: &AssumptionSet, per_user: &PerUserEconomics, per_bag: &PerBagEconomics) -> InvestorUnitEconomics {
    let lifetime = a.user_lifetime_months;
    let bag_ltv = lifetime * per_bag.net_margin_per_bag;
    let ad_ltv = lifetime * per_user.platform_margin_per_user;
    let total_ltv = bag_ltv + ad_ltv;
    let monthly_margin_per_user = per_user.platform_margin_per_user + a.bag_retail_price;

    InvestorUnitEconomics {
        user_acquisition_cost: a.user_acquisition_cost,
        lifetime_months: lifetime,
        bag_ltv,
        ad_ltv,
        total_ltv,
        ltv_cac_ratio: guarded_ratio(total_ltv, a.user_acquisition_cost, Decimal::ZERO),
        monthly_margin_per_user,
        payback_months: guarded_ratio(a.user_acquisition_cost, monthly_margin_per_user, Decimal::ZERO),
        contribution_margin_pct: percentage(
            monthly_margin_per_user,
            a.bag_retail_price + per_user.brand_spend_per_user,
        ),
    }
}
