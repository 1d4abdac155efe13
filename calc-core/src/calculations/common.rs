//! Common utility functions for calculations.
//!
//! Rounding, percentage conversion and the division guard shared by every
//! formula module.

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use tracing::warn;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly half a penny are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use calc_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(191.0135)), dec!(191.01));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps negative values to zero.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Converts a percentage (`5.5`) to a fraction (`0.055`).
pub fn percent_to_rate(percent: Decimal) -> Decimal {
    percent / Decimal::ONE_HUNDRED
}

/// Divides `numerator` by `denominator`, returning zero when the denominator
/// is zero or negative.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use calc_core::calculations::common::safe_div;
///
/// assert_eq!(safe_div(dec!(10), dec!(4)), dec!(2.5));
/// assert_eq!(safe_div(dec!(10), dec!(0)), dec!(0));
/// ```
pub fn safe_div(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// Like [`safe_div`] but yields `None` when the denominator is missing, so
/// callers can omit a dependent statistic instead of reporting zero.
pub fn optional_div(
    numerator: Decimal,
    denominator: Decimal,
) -> Option<Decimal> {
    if denominator <= Decimal::ZERO {
        return None;
    }
    numerator.checked_div(denominator)
}

/// The value of a checked calculation, or zero with a warning if it
/// overflowed.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use calc_core::calculations::common::or_zero;
///
/// assert_eq!(or_zero(dec!(2).checked_mul(dec!(3)), "product"), dec!(6));
/// assert_eq!(or_zero(Decimal::MAX.checked_mul(dec!(2)), "product"), dec!(0));
/// ```
pub fn or_zero(
    value: Option<Decimal>,
    what: &str,
) -> Decimal {
    value.unwrap_or_else(|| {
        warn!(what, "calculation overflowed; using zero");
        Decimal::ZERO
    })
}

/// `(1 + rate)^periods`, or `None` if the result overflows.
pub fn growth_factor(
    rate: Decimal,
    periods: u32,
) -> Option<Decimal> {
    Decimal::ONE
        .checked_add(rate)?
        .checked_powu(u64::from(periods))
}
