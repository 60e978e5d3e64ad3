//! First-year growth projection.
//!
//! Bag sales and enrolled brands compound quarterly. More brands raise the ad
//! fill rate up to a ceiling, and ad revenue scales with fill rate relative to
//! the base rate. The baseline is twelve months of the unchanged monthly summary.

use crate::result::MonthlySummary;
use configuration::AssumptionSet;
use metrics::formula::{apply_pct, guarded_ratio, percentage};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub const QUARTERS: u8 = 4;
const MONTHS_PER_QUARTER: Decimal = dec!(3);
const MONTHS_PER_YEAR: Decimal = dec!(12);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterProjection {
    /// 1-based quarter number.
    pub quarter: u8,
    pub bags_per_month: Decimal,
    pub brands: Decimal,
    /// Fraction of ad slots filled (0.0 - 1.0).
    pub fill_rate: Decimal,
    pub bag_revenue: Decimal,
    pub ad_revenue: Decimal,
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthProjection {
    pub quarters: Vec<QuarterProjection>,
    pub avg_bags_per_month: Decimal,
    pub avg_brands: Decimal,
    pub avg_fill_rate: Decimal,
    pub annual_bag_revenue: Decimal,
    pub annual_ad_revenue: Decimal,
    pub annual_revenue: Decimal,
    pub baseline_annual_bag_revenue: Decimal,
    pub baseline_annual_ad_revenue: Decimal,
    pub baseline_annual_revenue: Decimal,
    pub bag_revenue_lift_pct: Decimal,
    pub ad_revenue_lift_pct: Decimal,
    pub total_revenue_lift_pct: Decimal,
}

pub fn project_growth(a: &AssumptionSet, monthly: &MonthlySummary) -> GrowthProjection {
    let bag_growth = Decimal::ONE + apply_pct(Decimal::ONE, a.bag_sales_growth_quarterly_pct);
    let brand_growth = Decimal::ONE + apply_pct(Decimal::ONE, a.brand_growth_quarterly_pct);

    let mut quarters = Vec::with_capacity(usize::from(QUARTERS));
    let mut bags = a.bags_sold_per_month;
    let mut brands = a.initial_brands_enrolled;

    for quarter in 1..=QUARTERS {
        if quarter > 1 {
            bags *= bag_growth;
            brands *= brand_growth;
        }

        let fill_rate = fill_rate(a, brands);
        // A zero base fill rate leaves ad revenue unscaled.
        let fill_factor = guarded_ratio(fill_rate, a.base_fill_rate, Decimal::ONE);
        let active_users = apply_pct(bags, a.active_user_rate_pct);
        let monthly_ad_revenue = active_users * a.avg_monthly_ad_views * a.cpv_brand_pays * fill_factor;

        let bag_revenue = bags * a.bag_retail_price * MONTHS_PER_QUARTER;
        let ad_revenue = monthly_ad_revenue * MONTHS_PER_QUARTER;
        quarters.push(QuarterProjection {
            quarter,
            bags_per_month: bags,
            brands,
            fill_rate,
            bag_revenue,
            ad_revenue,
            total_revenue: bag_revenue + ad_revenue,
        });
    }

    let count = Decimal::from(QUARTERS);
    let sum = |f: fn(&QuarterProjection) -> Decimal| -> Decimal { quarters.iter().map(f).sum() };

    let annual_bag_revenue = sum(|q| q.bag_revenue);
    let annual_ad_revenue = sum(|q| q.ad_revenue);
    let annual_revenue = annual_bag_revenue + annual_ad_revenue;
    let baseline_annual_bag_revenue = monthly.bag_revenue * MONTHS_PER_YEAR;
    let baseline_annual_ad_revenue = monthly.ad_revenue * MONTHS_PER_YEAR;
    let baseline_annual_revenue = baseline_annual_bag_revenue + baseline_annual_ad_revenue;

    let projection = GrowthProjection {
        avg_bags_per_month: sum(|q| q.bags_per_month) / count,
        avg_brands: sum(|q| q.brands) / count,
        avg_fill_rate: sum(|q| q.fill_rate) / count,
        annual_bag_revenue,
        annual_ad_revenue,
        annual_revenue,
        baseline_annual_bag_revenue,
        baseline_annual_ad_revenue,
        baseline_annual_revenue,
        bag_revenue_lift_pct: lift_pct(annual_bag_revenue, baseline_annual_bag_revenue),
        ad_revenue_lift_pct: lift_pct(annual_ad_revenue, baseline_annual_ad_revenue),
        total_revenue_lift_pct: lift_pct(annual_revenue, baseline_annual_revenue),
        quarters,
    };

    tracing::debug!(
        annual_revenue = %projection.annual_revenue,
        lift_pct = %projection.total_revenue_lift_pct,
        "Growth projected"
    );
    projection
}

/// `min(ceiling, base + (brands / initial - 1) * gain)`.
fn fill_rate(a: &AssumptionSet, brands: Decimal) -> Decimal {
    let brand_multiple = guarded_ratio(brands, a.initial_brands_enrolled, Decimal::ONE);
    let improved = a.base_fill_rate + (brand_multiple - Decimal::ONE) * a.fill_rate_gain_per_brand_multiple;
    improved.min(a.fill_rate_ceiling)
}

fn lift_pct(projected: Decimal, baseline: Decimal) -> Decimal {
    percentage(projected - baseline, baseline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economics::{monthly_summary, per_user};

    fn project(a: &AssumptionSet) -> GrowthProjection {
        project_growth(a, &monthly_summary(a, &per_user(a)))
    }

    #[test]
    fn first_quarter_matches_three_baseline_months() {
        let growth = project(&AssumptionSet::default());
        let q1 = &growth.quarters[0];
        assert_eq!(q1.fill_rate, dec!(0.85));
        assert_eq!(q1.total_revenue, dec!(102000));
        assert_eq!(growth.baseline_annual_revenue, dec!(408000));
    }

    #[test]
    fn bags_brands_and_fill_rate_compound() {
        let growth = project(&AssumptionSet::default());
        let bags: Vec<Decimal> = growth.quarters.iter().map(|q| q.bags_per_month).collect();
        assert_eq!(bags, vec![dec!(10000), dec!(11500), dec!(13225), dec!(15208.75)]);

        let brands: Vec<Decimal> = growth.quarters.iter().map(|q| q.brands).collect();
        assert_eq!(brands, vec![dec!(10), dec!(12.5), dec!(15.625), dec!(19.53125)]);

        let fill: Vec<Decimal> = growth.quarters.iter().map(|q| q.fill_rate).collect();
        assert_eq!(fill, vec![dec!(0.85), dec!(0.87), dec!(0.895), dec!(0.92625)]);

        assert!(growth.total_revenue_lift_pct > Decimal::ZERO);
        assert!(growth.annual_revenue > growth.baseline_annual_revenue);
    }

    #[test]
    fn fill_rate_stops_at_the_ceiling() {
        let a = AssumptionSet {
            brand_growth_quarterly_pct: dec!(100),
            ..AssumptionSet::default()
        };
        let fill: Vec<Decimal> = project(&a).quarters.iter().map(|q| q.fill_rate).collect();
        assert_eq!(fill, vec![dec!(0.85), dec!(0.93), dec!(0.95), dec!(0.95)]);
    }

    #[test]
    fn no_growth_has_no_lift() {
        let a = AssumptionSet {
            bag_sales_growth_quarterly_pct: Decimal::ZERO,
            brand_growth_quarterly_pct: Decimal::ZERO,
            ..AssumptionSet::default()
        };
        let growth = project(&a);
        assert_eq!(growth.annual_revenue, growth.baseline_annual_revenue);
        assert_eq!(growth.total_revenue_lift_pct, Decimal::ZERO);
    }
}
