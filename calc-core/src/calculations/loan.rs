//! Amortizing loan payments and repayment schedules.
//!
//! # Zero-rate loans
//!
//! A loan at exactly 0% (or a negative rate, which the input guard turns into
//! 0%) is repaid in equal instalments of `principal / term_months`. It is not
//! treated as invalid input.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use calc_core::calculations::amortize;
//!
//! let loan = amortize(dec!(10000), dec!(5.5), 60).unwrap();
//!
//! assert_eq!(loan.monthly_payment, dec!(191.01));
//! assert_eq!(loan.schedule.len(), 60);
//! assert_eq!(loan.schedule[59].remaining_balance, dec!(0));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::{
    growth_factor, non_negative, or_zero, percent_to_rate, round_half_up,
};
use crate::{CalculationResult, ResultRow, ResultValue};

/// Longest term accepted, in months (100 years).
pub const MAX_TERM_MONTHS: u32 = 1200;

/// One payment period of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub period: u32,
    pub principal_paid: Decimal,
    pub interest_paid: Decimal,
    pub remaining_balance: Decimal,
}

/// A fully amortized loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amortization {
    pub principal: Decimal,
    pub annual_rate_percent: Decimal,
    pub term_months: u32,
    pub monthly_payment: Decimal,
    pub total_interest: Decimal,
    pub total_repayment: Decimal,
    pub schedule: Vec<AmortizationRow>,
}

impl CalculationResult for Amortization {
    fn title(&self) -> &'static str {
        "Loan repayment"
    }

    fn rows(&self) -> Vec<ResultRow> {
        vec![
            ResultRow::money("Loan amount", self.principal),
            ResultRow::percent("Interest rate (APR)", self.annual_rate_percent),
            ResultRow::new("Term (months)", ResultValue::Count(self.term_months)),
            ResultRow::money("Monthly payment", self.monthly_payment),
            ResultRow::money("Total interest", self.total_interest),
            ResultRow::money("Total repayment", self.total_repayment),
        ]
    }
}

/// The level monthly payment that repays `principal` over `term_months`,
/// unrounded.
///
/// `monthly_rate` is a fraction (0.055 / 12 for 5.5% APR). Returns `None`
/// when the term is zero or the calculation overflows.
pub fn level_payment(
    principal: Decimal,
    monthly_rate: Decimal,
    term_months: u32,
) -> Option<Decimal> {
    if term_months == 0 {
        return None;
    }
    if monthly_rate <= Decimal::ZERO {
        return principal.checked_div(Decimal::from(term_months));
    }

    // P * r / (1 - (1 + r)^-n), written as P * r * f / (f - 1) with f = (1 + r)^n
    let factor = growth_factor(monthly_rate, term_months)?;
    let denominator = factor.checked_sub(Decimal::ONE)?;
    if denominator <= Decimal::ZERO {
        return principal.checked_div(Decimal::from(term_months));
    }
    principal
        .checked_mul(monthly_rate)?
        .checked_mul(factor)?
        .checked_div(denominator)
}

/// Rounded monthly payment for a loan, without building the schedule.
///
/// Zero when the principal or term is missing.
pub fn monthly_payment(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> Decimal {
    let principal = non_negative(principal);
    let monthly_rate = monthly_rate(annual_rate_percent);
    level_payment(principal, monthly_rate, term_months)
        .map_or(Decimal::ZERO, round_half_up)
}

/// Monthly interest on an interest-only loan. Zero if it overflows.
pub fn interest_only_payment(
    principal: Decimal,
    annual_rate_percent: Decimal,
) -> Decimal {
    let interest = non_negative(principal).checked_mul(monthly_rate(annual_rate_percent));
    round_half_up(or_zero(interest, "interest-only payment"))
}

fn monthly_rate(annual_rate_percent: Decimal) -> Decimal {
    percent_to_rate(non_negative(annual_rate_percent)) / Decimal::from(12)
}

/// Computes the payment, totals and full repayment schedule of a loan.
///
/// Returns `None` when the principal is zero or negative, the term is zero or
/// longer than [`MAX_TERM_MONTHS`], or the calculation overflows.
///
/// The balance is carried at full precision and each row reports it rounded
/// to pennies; the principal paid in a row is the drop in the rounded
/// balance. The principal column therefore sums to exactly the amount
/// borrowed and the last balance is zero.
pub fn amortize(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> Option<Amortization> {
    let principal = round_half_up(principal);
    let annual_rate_percent = non_negative(annual_rate_percent);
    if principal <= Decimal::ZERO || term_months == 0 {
        return None;
    }
    if term_months > MAX_TERM_MONTHS {
        warn!(term_months, "loan term exceeds maximum; ignoring");
        return None;
    }

    let monthly_rate = monthly_rate(annual_rate_percent);
    let schedule = level_payment(principal, monthly_rate, term_months)
        .and_then(|payment| build_schedule(principal, monthly_rate, payment, term_months));
    let Some((payment, schedule)) = schedule else {
        warn!(%principal, %annual_rate_percent, term_months, "loan calculation overflowed");
        return None;
    };

    let totals = schedule
        .iter()
        .try_fold(Decimal::ZERO, |total, row| total.checked_add(row.interest_paid))
        .and_then(|interest| Some((interest, principal.checked_add(interest)?)));
    let Some((total_interest, total_repayment)) = totals else {
        warn!(%principal, %annual_rate_percent, term_months, "loan totals overflowed");
        return None;
    };

    debug!(%principal, %annual_rate_percent, term_months, %payment, "amortized loan");

    Some(Amortization {
        principal,
        annual_rate_percent,
        term_months,
        monthly_payment: payment,
        total_interest,
        total_repayment,
        schedule,
    })
}

fn build_schedule(
    principal: Decimal,
    monthly_rate: Decimal,
    payment: Decimal,
    term_months: u32,
) -> Option<(Decimal, Vec<AmortizationRow>)> {
    let mut balance = principal;
    let mut reported_balance = principal;
    let mut schedule = Vec::with_capacity(term_months as usize);

    for period in 1..=term_months {
        let interest = balance.checked_mul(monthly_rate)?;
        balance = balance.checked_add(interest)?.checked_sub(payment)?;

        let remaining_balance = if period == term_months {
            Decimal::ZERO
        } else {
            round_half_up(non_negative(balance)).min(reported_balance)
        };

        schedule.push(AmortizationRow {
            period,
            principal_paid: reported_balance - remaining_balance,
            interest_paid: round_half_up(interest),
            remaining_balance,
        });
        reported_balance = remaining_balance;
    }

    Some((round_half_up(payment), schedule))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
    use rust_decimal_macros::dec;

    use super::*;

    fn assert_close(
        actual: Decimal,
        expected: Decimal,
        tolerance: Decimal,
    ) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}, tolerance {tolerance}"
        );
    }

    // =========================================================================
    // amortize tests
    // =========================================================================

    #[test]
    fn amortize_five_year_personal_loan() {
        let loan = amortize(dec!(10000), dec!(5.5), 60).unwrap();

        assert_eq!(loan.monthly_payment, dec!(191.01));
        assert_close(loan.total_repayment, dec!(11460.69), dec!(0.02));
        assert_close(loan.monthly_payment * dec!(60), loan.total_repayment, dec!(0.60));
        assert_eq!(loan.total_repayment - loan.principal, loan.total_interest);
    }

    #[test]
    fn amortize_first_row_splits_interest_and_principal() {
        let loan = amortize(dec!(10000), dec!(5.5), 60).unwrap();
        let first = &loan.schedule[0];

        // 10000 * 0.055 / 12 = 45.8333...
        assert_eq!(first.period, 1);
        assert_eq!(first.interest_paid, dec!(45.83));
        assert_eq!(first.principal_paid, dec!(145.18));
        assert_eq!(first.remaining_balance, dec!(9854.82));
    }

    #[test]
    fn amortize_principal_paid_sums_to_principal() {
        let loan = amortize(dec!(250000), dec!(4.25), 300).unwrap();
        let repaid: Decimal = loan.schedule.iter().map(|r| r.principal_paid).sum();

        assert_eq!(repaid, dec!(250000));
        assert_eq!(loan.schedule.last().unwrap().remaining_balance, dec!(0));
    }

    #[test]
    fn amortize_zero_rate_divides_principal_evenly() {
        let loan = amortize(dec!(1200), dec!(0), 12).unwrap();

        assert_eq!(loan.monthly_payment, dec!(100));
        assert_eq!(loan.total_interest, dec!(0));
        assert_eq!(loan.total_repayment, dec!(1200));
    }

    #[test]
    fn amortize_zero_rate_spreads_odd_pennies() {
        let loan = amortize(dec!(1000), dec!(0), 3).unwrap();
        let paid: Vec<_> = loan.schedule.iter().map(|r| r.principal_paid).collect();

        assert_eq!(loan.monthly_payment, dec!(333.33));
        assert_eq!(paid, vec![dec!(333.33), dec!(333.34), dec!(333.33)]);
        assert_eq!(loan.schedule[2].remaining_balance, dec!(0));
    }

    #[test]
    fn amortize_negative_rate_is_treated_as_zero() {
        let loan = amortize(dec!(1200), dec!(-3), 12).unwrap();

        assert_eq!(loan.annual_rate_percent, dec!(0));
        assert_eq!(loan.monthly_payment, dec!(100));
    }

    #[test]
    fn amortize_rejects_zero_principal() {
        assert_eq!(amortize(dec!(0), dec!(5), 60), None);
        assert_eq!(amortize(dec!(-10), dec!(5), 60), None);
    }

    #[test]
    fn amortize_rejects_zero_term() {
        assert_eq!(amortize(dec!(10000), dec!(5), 0), None);
    }

    #[test]
    fn amortize_rejects_excessive_term() {
        assert_eq!(amortize(dec!(10000), dec!(5), MAX_TERM_MONTHS + 1), None);
    }

    #[test]
    fn amortize_single_period_repays_with_one_month_interest() {
        let loan = amortize(dec!(1200), dec!(12), 1).unwrap();

        assert_eq!(loan.monthly_payment, dec!(1212.00));
        assert_eq!(loan.total_interest, dec!(12.00));
    }

    // =========================================================================
    // payment helper tests
    // =========================================================================

    #[test]
    fn monthly_payment_matches_amortize() {
        assert_eq!(monthly_payment(dec!(10000), dec!(5.5), 60), dec!(191.01));
    }

    #[test]
    fn monthly_payment_zero_without_term() {
        assert_eq!(monthly_payment(dec!(10000), dec!(5.5), 0), dec!(0));
    }

    #[test]
    fn interest_only_payment_charges_monthly_interest() {
        // 200000 * 0.045 / 12
        assert_eq!(interest_only_payment(dec!(200000), dec!(4.5)), dec!(750.00));
    }

    #[test]
    fn interest_only_payment_overflow_is_zero() {
        let payment = interest_only_payment(dec!(300000), dec!(10000000000000000000000000000));

        assert_eq!(payment, dec!(0));
    }

    // =========================================================================
    // properties
    // =========================================================================

    proptest! {
        #[test]
        fn prop_schedule_conserves_principal(
            pounds in 1u32..2_000_000,
            rate_bp in 0u32..2500,
            term in 1u32..480,
        ) {
            let principal = Decimal::from(pounds);
            let rate = Decimal::new(i64::from(rate_bp), 2);

            let loan = amortize(principal, rate, term).unwrap();
            let repaid: Decimal = loan.schedule.iter().map(|r| r.principal_paid).sum();

            prop_assert_eq!(repaid, principal);
            prop_assert_eq!(loan.schedule.len(), term as usize);
            prop_assert_eq!(loan.schedule[loan.schedule.len() - 1].remaining_balance, Decimal::ZERO);
        }

        #[test]
        fn prop_balance_never_increases(
            pounds in 1u32..500_000,
            rate_bp in 0u32..2500,
            term in 1u32..360,
        ) {
            let loan = amortize(Decimal::from(pounds), Decimal::new(i64::from(rate_bp), 2), term).unwrap();

            let mut previous = loan.principal;
            for row in &loan.schedule {
                prop_assert!(row.remaining_balance >= Decimal::ZERO);
                prop_assert!(row.remaining_balance <= previous);
                previous = row.remaining_balance;
            }
        }

        #[test]
        fn prop_payment_times_term_approximates_total(
            pounds in 100u32..1_000_000,
            rate_bp in 1u32..2000,
            term in 12u32..360,
        ) {
            let loan = amortize(Decimal::from(pounds), Decimal::new(i64::from(rate_bp), 2), term).unwrap();
            let nominal = loan.monthly_payment * Decimal::from(term);

            // Payment and monthly interest are each within half a penny of exact.
            let tolerance = Decimal::from(term) * dec!(0.01) + dec!(0.01);
            prop_assert!((nominal - loan.total_repayment).abs() <= tolerance);
        }
    }
}
