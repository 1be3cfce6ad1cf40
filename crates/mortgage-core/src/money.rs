use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::types::{Money, Percent};

/// Fractional digits kept on every finalized monetary amount.
pub const CURRENCY_DP: u32 = 2;

/// Fixed background inflation applied to insurance, expense, HOA and the
/// inflated down-payment basis. Independent of any user-supplied percent.
pub const INFLATION_PERCENT: Percent = dec!(1.5);

pub const MONTHS_IN_YEAR: u32 = 12;

/// How a value is brought to cent precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Toward positive infinity. Used for the level payment so the borrower
    /// never underpays.
    Up,
    /// Nearest cent, ties away from zero.
    HalfUp,
}

impl Rounding {
    fn strategy(self) -> RoundingStrategy {
        match self {
            Rounding::Up => RoundingStrategy::ToPositiveInfinity,
            Rounding::HalfUp => RoundingStrategy::MidpointAwayFromZero,
        }
    }
}

/// Quantize `value` to exactly two fractional digits.
///
/// Negative zero is normalized so `-0.001` rounds to `0.00`, never `-0.00`.
pub fn dollar(value: Decimal, rounding: Rounding) -> Money {
    let mut rounded = value.round_dp_with_strategy(CURRENCY_DP, rounding.strategy());
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(CURRENCY_DP);
    rounded
}

/// Apply one period of simple percentage growth. No rounding.
pub fn inflate(amount: Decimal, percent: Percent) -> Decimal {
    amount + amount * percent / dec!(100)
}

/// `100 * numerator / denominator`, or `None` when the denominator is zero.
pub fn percent_of(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        None
    } else {
        Some(numerator / denominator * dec!(100))
    }
}
