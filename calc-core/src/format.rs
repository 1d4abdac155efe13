//! Display formatting for result values.
//!
//! | Value | Example |
//! |-------|---------|
//! | Money | `£1,234.56`, `-£12.50` |
//! | Percent | `5.50%` |
//! | Years | `10.29 years` |
//! | Weeks | `12 weeks` |
//! | Flag | `Yes` / `No` |

use rust_decimal::Decimal;

use crate::ResultValue;
use crate::calculations::common::round_half_up;

/// Inserts thousands separators into the integer part of a plain decimal
/// string such as `"1234567.89"`.
fn group_thousands(plain: &str) -> String {
    let (integer, fraction) = match plain.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (plain, None),
    };

    let mut grouped = String::with_capacity(plain.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// Formats an amount of money in pounds, always with two decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use calc_core::format::format_gbp;
///
/// assert_eq!(format_gbp(dec!(1234.5)), "£1,234.50");
/// assert_eq!(format_gbp(dec!(-12.5)), "-£12.50");
/// ```
pub fn format_gbp(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let digits = group_thousands(&format!("{:.2}", rounded.abs()));
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-£{digits}")
    } else {
        format!("£{digits}")
    }
}

/// Formats a percentage (already in percent, not a fraction) to two places.
pub fn format_percent(percent: Decimal) -> String {
    format!("{:.2}%", round_half_up(percent))
}

fn format_quantity(
    value: Decimal,
    unit: &str,
) -> String {
    let value = round_half_up(value).normalize();
    if value == Decimal::ONE {
        format!("1 {}", unit.trim_end_matches('s'))
    } else {
        format!("{value} {unit}")
    }
}

/// Formats any [`ResultValue`] for display.
pub fn format_value(value: &ResultValue) -> String {
    match value {
        ResultValue::Money(amount) => format_gbp(*amount),
        ResultValue::Percent(percent) => format_percent(*percent),
        ResultValue::Years(years) => format_quantity(*years, "years"),
        ResultValue::Weeks(weeks) => format_quantity(*weeks, "weeks"),
        ResultValue::Count(count) => count.to_string(),
        ResultValue::Flag(true) => "Yes".to_string(),
        ResultValue::Flag(false) => "No".to_string(),
        ResultValue::Text(text) => text.clone(),
    }
}

/// The bare value without currency symbols or separators, for CSV export.
pub fn plain_value(value: &ResultValue) -> String {
    match value {
        ResultValue::Money(amount) => format!("{:.2}", round_half_up(*amount)),
        ResultValue::Percent(percent) => format!("{:.2}", round_half_up(*percent)),
        ResultValue::Years(n) | ResultValue::Weeks(n) => round_half_up(*n).normalize().to_string(),
        ResultValue::Count(count) => count.to_string(),
        ResultValue::Flag(flag) => flag.to_string(),
        ResultValue::Text(text) => text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // format_gbp tests
    // =========================================================================

    #[test]
    fn gbp_groups_thousands() {
        assert_eq!(format_gbp(dec!(1234567.891)), "£1,234,567.89");
        assert_eq!(format_gbp(dec!(100000)), "£100,000.00");
    }

    #[test]
    fn gbp_small_amounts_have_no_separator() {
        assert_eq!(format_gbp(dec!(0)), "£0.00");
        assert_eq!(format_gbp(dec!(999.999)), "£1,000.00");
        assert_eq!(format_gbp(dec!(12.3)), "£12.30");
    }

    #[test]
    fn gbp_negative_puts_sign_before_symbol() {
        assert_eq!(format_gbp(dec!(-1800)), "-£1,800.00");
    }

    #[test]
    fn gbp_negative_rounding_to_zero_has_no_sign() {
        assert_eq!(format_gbp(dec!(-0.001)), "£0.00");
    }

    // =========================================================================
    // format_value tests
    // =========================================================================

    #[test]
    fn percent_has_two_places() {
        assert_eq!(format_value(&ResultValue::Percent(dec!(5.5))), "5.50%");
    }

    #[test]
    fn quantities_carry_units() {
        assert_eq!(format_value(&ResultValue::Years(dec!(10.29))), "10.29 years");
        assert_eq!(format_value(&ResultValue::Weeks(dec!(12.0))), "12 weeks");
        assert_eq!(format_value(&ResultValue::Weeks(dec!(1))), "1 week");
    }

    #[test]
    fn flags_read_yes_and_no() {
        assert_eq!(format_value(&ResultValue::Flag(true)), "Yes");
        assert_eq!(format_value(&ResultValue::Flag(false)), "No");
    }

    #[test]
    fn plain_values_have_no_symbols() {
        assert_eq!(plain_value(&ResultValue::Money(dec!(1234.5))), "1234.50");
        assert_eq!(plain_value(&ResultValue::Percent(dec!(6))), "6.00");
        assert_eq!(plain_value(&ResultValue::Flag(true)), "true");
    }
}
