//! Numeric input guard.
//!
//! Form fields arrive as text (or occasionally as floats from other callers).
//! Every formula entry point expects clean, finite, non-negative numbers, so
//! raw values pass through [`to_safe_number`] first. Invalid input never
//! fails: it degrades to zero so a half-filled form still produces a result.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use tracing::warn;

/// A raw value that can be turned into a [`Decimal`], if it is a number at all.
pub trait RawNumber {
    fn to_decimal(&self) -> Option<Decimal>;
}

impl RawNumber for str {
    fn to_decimal(&self) -> Option<Decimal> {
        let normalized = normalize_input(self);
        if normalized.is_empty() {
            return None;
        }
        match Decimal::from_str(&normalized) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(input = %self, "unparseable numeric input: {}", e);
                None
            }
        }
    }
}

impl RawNumber for String {
    fn to_decimal(&self) -> Option<Decimal> {
        self.as_str().to_decimal()
    }
}

impl RawNumber for f64 {
    fn to_decimal(&self) -> Option<Decimal> {
        if !self.is_finite() {
            warn!(input = %self, "non-finite numeric input");
            return None;
        }
        Decimal::from_f64(*self)
    }
}

impl RawNumber for i64 {
    fn to_decimal(&self) -> Option<Decimal> {
        Some(Decimal::from(*self))
    }
}

impl RawNumber for u32 {
    fn to_decimal(&self) -> Option<Decimal> {
        Some(Decimal::from(*self))
    }
}

impl RawNumber for Decimal {
    fn to_decimal(&self) -> Option<Decimal> {
        Some(*self)
    }
}

impl<T: RawNumber + ?Sized> RawNumber for &T {
    fn to_decimal(&self) -> Option<Decimal> {
        (**self).to_decimal()
    }
}

/// Trims whitespace and drops currency symbols, thousands separators and a
/// trailing percent sign (e.g. `" £1,234.50 "` or `"5.5%"`).
fn normalize_input(s: &str) -> String {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed);
    trimmed
        .chars()
        .filter(|c| !matches!(c, '£' | ',' | '_') && !c.is_whitespace())
        .collect()
}

/// Converts raw input to a finite, non-negative number.
///
/// Returns zero for empty, non-numeric, non-finite or negative input.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use calc_core::calculations::guard::to_safe_number;
///
/// assert_eq!(to_safe_number("£1,250.50"), dec!(1250.50));
/// assert_eq!(to_safe_number("abc"), dec!(0));
/// assert_eq!(to_safe_number("-4"), dec!(0));
/// assert_eq!(to_safe_number(f64::NAN), dec!(0));
/// ```
pub fn to_safe_number<T: RawNumber>(raw: T) -> Decimal {
    match raw.to_decimal() {
        None => Decimal::ZERO,
        Some(value) if value.is_zero() => Decimal::ZERO,
        Some(value) if value.is_sign_negative() => {
            warn!(%value, "negative input where only non-negative values are allowed");
            Decimal::ZERO
        }
        Some(value) => value.normalize(),
    }
}

/// Like [`to_safe_number`] but keeps negative values, for fields where a
/// negative figure is meaningful (a loss, a falling growth assumption).
pub fn to_safe_signed_number<T: RawNumber>(raw: T) -> Decimal {
    match raw.to_decimal() {
        Some(value) if !value.is_zero() => value.normalize(),
        _ => Decimal::ZERO,
    }
}

/// Converts raw input to a whole count (terms, ages, years of service).
///
/// Fractions are truncated; anything invalid, negative or too large for a
/// `u32` becomes zero.
pub fn to_safe_count<T: RawNumber>(raw: T) -> u32 {
    to_safe_number(raw).trunc().to_u32().unwrap_or(0)
}
