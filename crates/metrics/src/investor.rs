use crate::formula::{guarded_ratio, percentage, saturating_div, HUNDRED};
use core_types::InvestmentPosition;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Investor-side view of a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestorReport {
    pub initial_investment: Decimal,
    pub current_value: Decimal,
    pub unrealized_gain: Decimal,
    pub roi_pct: Decimal,
    /// Compound annual growth rate over the holding period.
    pub annualized_return_pct: Decimal,
    /// Multiple on invested capital: current value / initial investment.
    pub moic: Decimal,
    /// Gain as a share of the current value.
    pub profit_margin_pct: Decimal,
}

/// Derives ROI, annualized return, MOIC and margin for one position.
///
/// A zero initial investment or holding period yields zero for the metrics
/// that divide by it.
pub fn evaluate_position(position: &InvestmentPosition) -> InvestorReport {
    let InvestmentPosition {
        initial_investment,
        current_value,
        period_years,
    } = *position;
    let gain = current_value.saturating_sub(initial_investment);

    InvestorReport {
        initial_investment,
        current_value,
        unrealized_gain: gain,
        roi_pct: percentage(gain, initial_investment),
        annualized_return_pct: annualized_return(initial_investment, current_value, period_years),
        moic: guarded_ratio(current_value, initial_investment, Decimal::ZERO),
        profit_margin_pct: percentage(gain, current_value),
    }
}

fn annualized_return(initial: Decimal, current: Decimal, years: Decimal) -> Decimal {
    if initial <= Decimal::ZERO || years <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let multiple = saturating_div(current, initial);
    if multiple <= Decimal::ZERO {
        // Nothing left of the position.
        return -HUNDRED;
    }

    match multiple.checked_powd(Decimal::ONE / years) {
        Some(growth) => (growth - Decimal::ONE).saturating_mul(HUNDRED),
        None => {
            tracing::warn!(%multiple, %years, "Annualized return overflowed; reporting zero");
            Decimal::ZERO
        }
    }
}
