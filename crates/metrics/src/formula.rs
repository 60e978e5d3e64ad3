//! Guarded arithmetic shared by every calculator in the workspace.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const HUNDRED: Decimal = dec!(100);

/// The bound an overflowing result is pinned to.
pub fn overflow_bound(negative: bool) -> Decimal {
    if negative { Decimal::MIN } else { Decimal::MAX }
}

/// `numerator / denominator` for a positive denominator, saturating on overflow.
pub fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator
        .checked_div(denominator)
        .unwrap_or_else(|| overflow_bound(numerator.is_sign_negative() != denominator.is_sign_negative()))
}

/// `numerator / denominator`, or `edge_case` when the denominator is zero or negative.
pub fn guarded_ratio(numerator: Decimal, denominator: Decimal, edge_case: Decimal) -> Decimal {
    if denominator <= Decimal::ZERO {
        edge_case
    } else {
        saturating_div(numerator, denominator)
    }
}

/// `numerator / denominator * 100`, or zero when the denominator is not positive.
pub fn percentage(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        saturating_div(numerator, denominator).saturating_mul(HUNDRED)
    }
}

/// Applies a 0-100 percentage rate to an amount.
pub fn apply_pct(amount: Decimal, rate_pct: Decimal) -> Decimal {
    amount.saturating_mul(rate_pct) / HUNDRED
}
