//! Residential mortgage quotes and borrowing limits.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{non_negative, or_zero, round_half_up};
use crate::calculations::loan::{amortize, interest_only_payment};
use crate::calculations::ratios::{loan_to_income, loan_to_value};
use crate::{CalculationResult, ResultRow, ResultValue};

/// Income multiple most UK lenders cap borrowing at.
pub const DEFAULT_INCOME_MULTIPLE: Decimal = Decimal::from_parts(45, 0, 0, false, 1);

/// Inputs for [`mortgage_quote`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MortgageInput {
    pub property_price: Decimal,
    pub deposit: Decimal,
    pub annual_rate_percent: Decimal,
    pub term_years: u32,
    /// Gross household income; zero when not supplied.
    pub annual_income: Decimal,
    /// Borrowing cap as a multiple of income.
    pub income_multiple: Decimal,
}

/// Result of [`mortgage_quote`].
///
/// Ratios and affordability figures are `None` when the input they depend on
/// was not supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MortgageQuote {
    pub loan_amount: Decimal,
    pub term_months: u32,
    pub monthly_payment: Decimal,
    pub interest_only_payment: Decimal,
    pub total_interest: Decimal,
    pub total_repayment: Decimal,
    pub loan_to_value: Option<Decimal>,
    pub loan_to_income: Option<Decimal>,
    pub max_borrowing: Option<Decimal>,
    pub within_income_multiple: Option<bool>,
}

impl CalculationResult for MortgageQuote {
    fn title(&self) -> &'static str {
        "Mortgage"
    }

    fn rows(&self) -> Vec<ResultRow> {
        let mut rows = vec![
            ResultRow::money("Loan amount", self.loan_amount),
            ResultRow::new("Term (months)", ResultValue::Count(self.term_months)),
            ResultRow::money("Monthly repayment", self.monthly_payment),
            ResultRow::money("Interest-only payment", self.interest_only_payment),
            ResultRow::money("Total interest", self.total_interest),
            ResultRow::money("Total repayment", self.total_repayment),
        ];
        if let Some(ltv) = self.loan_to_value {
            rows.push(ResultRow::percent("Loan to value", ltv));
        }
        if let Some(lti) = self.loan_to_income {
            rows.push(ResultRow::new(
                "Loan to income (x)",
                ResultValue::Text(lti.normalize().to_string()),
            ));
        }
        if let Some(max) = self.max_borrowing {
            rows.push(ResultRow::money("Maximum borrowing", max));
        }
        if let Some(within) = self.within_income_multiple {
            rows.push(ResultRow::new("Within lending limit", ResultValue::Flag(within)));
        }
        rows
    }
}

/// Quotes repayment and interest-only payments for a purchase.
///
/// The loan is the price less the deposit (never negative). When the loan is
/// zero (deposit covers the price, or no price given) the payment figures are
/// all zero.
pub fn mortgage_quote(input: &MortgageInput) -> MortgageQuote {
    let property_price = non_negative(input.property_price);
    let loan_amount = non_negative(property_price - non_negative(input.deposit));
    let term_months = input.term_years.saturating_mul(12);
    let income = non_negative(input.annual_income);

    let amortization = amortize(loan_amount, input.annual_rate_percent, term_months);
    let (monthly_payment, total_interest, total_repayment) = amortization
        .as_ref()
        .map_or((Decimal::ZERO, Decimal::ZERO, Decimal::ZERO), |a| {
            (a.monthly_payment, a.total_interest, a.total_repayment)
        });

    let has_price = property_price > Decimal::ZERO;
    let has_income = income > Decimal::ZERO;
    let max_borrowing = has_income.then(|| {
        let max = income.checked_mul(non_negative(input.income_multiple));
        round_half_up(or_zero(max, "maximum borrowing"))
    });

    MortgageQuote {
        loan_amount,
        term_months,
        monthly_payment,
        interest_only_payment: interest_only_payment(loan_amount, input.annual_rate_percent),
        total_interest,
        total_repayment,
        loan_to_value: has_price.then(|| loan_to_value(loan_amount, property_price)),
        loan_to_income: has_income.then(|| loan_to_income(loan_amount, income)),
        max_borrowing,
        within_income_multiple: max_borrowing.map(|max| loan_amount <= max),
    }
}
