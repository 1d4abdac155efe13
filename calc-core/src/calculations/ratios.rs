//! Ratio and percentage helpers.
//!
//! Every ratio here returns zero when its denominator is zero or negative,
//! never an infinite or undefined value. Results are percentages
//! (`6.0` means 6%) rounded to two places, except
//! [`effective_annual_rate`] which is rounded to four.

use rust_decimal::{Decimal, MathematicalOps};

use crate::calculations::common::{non_negative, or_zero, percent_to_rate, round_half_up, safe_div};

fn as_percent(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    let percent = safe_div(numerator, denominator).checked_mul(Decimal::ONE_HUNDRED);
    round_half_up(or_zero(percent, "percentage"))
}

/// Annual rent as a percentage of property value.
pub fn gross_yield(
    annual_rent: Decimal,
    property_value: Decimal,
) -> Decimal {
    as_percent(non_negative(annual_rent), property_value)
}

/// Annual rent after costs as a percentage of property value. May be negative
/// when costs exceed rent.
pub fn net_yield(
    annual_rent: Decimal,
    annual_costs: Decimal,
    property_value: Decimal,
) -> Decimal {
    let net_rent = non_negative(annual_rent) - non_negative(annual_costs);
    as_percent(net_rent, property_value)
}

/// Loan-to-value, as a percentage.
pub fn loan_to_value(
    loan_amount: Decimal,
    property_value: Decimal,
) -> Decimal {
    as_percent(non_negative(loan_amount), property_value)
}

/// Loan-to-income multiple (`4.5` means 4.5× income), rounded to two places.
pub fn loan_to_income(
    loan_amount: Decimal,
    income: Decimal,
) -> Decimal {
    round_half_up(safe_div(non_negative(loan_amount), income))
}

/// Net annual income as a percentage of the cash actually put in.
pub fn cash_on_cash_return(
    net_annual_income: Decimal,
    cash_invested: Decimal,
) -> Decimal {
    as_percent(net_annual_income, cash_invested)
}

/// `charge` as a percentage of `base`: the effective rate of a tax.
pub fn effective_rate(
    charge: Decimal,
    base: Decimal,
) -> Decimal {
    as_percent(non_negative(charge), base)
}

/// `percent` per cent of `value`, rounded to pennies.
pub fn percentage_of(
    value: Decimal,
    percent: Decimal,
) -> Decimal {
    round_half_up(or_zero(value.checked_mul(percent_to_rate(percent)), "percentage of value"))
}

/// Effective annual rate of a nominal rate compounded `periods_per_year`
/// times, as a percentage rounded to four places.
///
/// Zero periods is treated as annual compounding.
pub fn effective_annual_rate(
    nominal_percent: Decimal,
    periods_per_year: u32,
) -> Decimal {
    let periods = periods_per_year.max(1);
    let periodic = percent_to_rate(non_negative(nominal_percent)) / Decimal::from(periods);

    (Decimal::ONE + periodic)
        .checked_powu(u64::from(periods))
        .and_then(|factor| (factor - Decimal::ONE).checked_mul(Decimal::ONE_HUNDRED))
        .map_or(Decimal::ZERO, |percent| percent.round_dp(4))
}
