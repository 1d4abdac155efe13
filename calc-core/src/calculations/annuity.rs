//! Level income drawn from a pot until it runs out.
//!
//! This is a loan in reverse: the pot is the principal and the income is the
//! level payment that exhausts it over the term, so it shares the loan
//! payment formula (including the linear 0% case).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{non_negative, or_zero};
use crate::calculations::growth::MAX_YEARS;
use crate::calculations::loan::monthly_payment;
use crate::{CalculationResult, ResultRow, ResultValue};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnuityIncome {
    pub pot: Decimal,
    pub years: u32,
    pub monthly_income: Decimal,
    pub annual_income: Decimal,
    pub total_paid: Decimal,
    /// Growth earned on the undrawn balance over the term.
    pub total_growth: Decimal,
}

impl CalculationResult for AnnuityIncome {
    fn title(&self) -> &'static str {
        "Annuity income"
    }

    fn rows(&self) -> Vec<ResultRow> {
        vec![
            ResultRow::money("Pot", self.pot),
            ResultRow::new("Years", ResultValue::Years(Decimal::from(self.years))),
            ResultRow::money("Monthly income", self.monthly_income),
            ResultRow::money("Annual income", self.annual_income),
            ResultRow::money("Total paid out", self.total_paid),
            ResultRow::money("Growth earned", self.total_growth),
        ]
    }
}

/// Monthly income from `pot` over `years` at `annual_rate_percent`.
///
/// A zero pot or zero years gives zero income.
pub fn annuity_income(
    pot: Decimal,
    annual_rate_percent: Decimal,
    years: u32,
) -> AnnuityIncome {
    let pot = non_negative(pot);
    let years = years.min(MAX_YEARS);
    let months = years * 12;

    let monthly_income = monthly_payment(pot, annual_rate_percent, months);
    let total_paid = or_zero(monthly_income.checked_mul(Decimal::from(months)), "annuity total");

    debug!(%pot, %annual_rate_percent, years, %monthly_income, "calculated annuity income");

    AnnuityIncome {
        pot,
        years,
        monthly_income,
        annual_income: or_zero(monthly_income.checked_mul(Decimal::from(12)), "annual income"),
        total_paid,
        // the payment is rounded to pennies, so at 0% the payout can fall a
        // few pence short of the pot
        total_growth: non_negative(total_paid - pot),
    }
}
