//! Income tax on employment and other non-savings income.
//!
//! Tax is charged on income above the personal allowance using the income tax
//! band table. The allowance is withdrawn by £1 for every £2 of income above
//! the taper threshold, which creates the effective 60% band between £100,000
//! and £125,140.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use calc_core::calculations::uk::{IncomeTaxCalculator, IncomeTaxConfig};
//!
//! let calculator = IncomeTaxCalculator::new(IncomeTaxConfig::default());
//! let result = calculator.calculate(dec!(92570));
//!
//! assert_eq!(result.taxable_income, dec!(80000));
//! assert_eq!(result.tax, dec!(24460.00));
//! ```

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::calculations::bands::{BandBreakdown, BandEvaluator};
use crate::calculations::common::non_negative;
use crate::calculations::ratios::effective_rate;
use crate::rates::{
    PERSONAL_ALLOWANCE, PERSONAL_ALLOWANCE_TAPER_THRESHOLD, UK_INCOME_TAX_BANDS_2024_25,
};
use crate::{BandTable, CalculationResult, ResultRow};

/// Rates and thresholds for [`IncomeTaxCalculator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeTaxConfig {
    /// Tax-free allowance before tapering.
    pub personal_allowance: Decimal,
    /// Income above which the allowance is withdrawn.
    pub taper_threshold: Decimal,
    /// Bands applied to income above the allowance.
    pub bands: BandTable,
}

impl Default for IncomeTaxConfig {
    fn default() -> Self {
        Self {
            personal_allowance: PERSONAL_ALLOWANCE,
            taper_threshold: PERSONAL_ALLOWANCE_TAPER_THRESHOLD,
            bands: UK_INCOME_TAX_BANDS_2024_25.clone(),
        }
    }
}

/// Result of [`IncomeTaxCalculator::calculate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeTax {
    pub gross_income: Decimal,
    pub personal_allowance: Decimal,
    pub taxable_income: Decimal,
    pub tax: Decimal,
    pub net_income: Decimal,
    pub effective_rate_percent: Decimal,
    /// Rate on the next pound earned, including the allowance taper.
    pub marginal_rate_percent: Decimal,
    pub breakdown: Vec<BandBreakdown>,
}

impl CalculationResult for IncomeTax {
    fn title(&self) -> &'static str {
        "Income tax"
    }

    fn rows(&self) -> Vec<ResultRow> {
        let mut rows = vec![
            ResultRow::money("Gross income", self.gross_income),
            ResultRow::money("Personal allowance", self.personal_allowance),
            ResultRow::money("Taxable income", self.taxable_income),
        ];
        rows.extend(self.breakdown.iter().map(BandBreakdown::to_row));
        rows.push(ResultRow::money("Income tax", self.tax));
        rows.push(ResultRow::money("Net income", self.net_income));
        rows.push(ResultRow::percent("Effective rate", self.effective_rate_percent));
        rows.push(ResultRow::percent("Marginal rate", self.marginal_rate_percent));
        rows
    }
}

/// The personal allowance left after the £1-for-£2 taper.
///
/// Only whole pounds of reduction are applied.
pub fn tapered_personal_allowance(
    income: Decimal,
    allowance: Decimal,
    taper_threshold: Decimal,
) -> Decimal {
    let excess = non_negative(income - taper_threshold);
    let reduction = (excess / Decimal::TWO).floor();
    non_negative(allowance - reduction)
}

/// Calculates income tax for a year's gross income.
#[derive(Debug, Clone)]
pub struct IncomeTaxCalculator {
    config: IncomeTaxConfig,
}

impl IncomeTaxCalculator {
    pub fn new(config: IncomeTaxConfig) -> Self {
        Self { config }
    }

    pub fn calculate(
        &self,
        gross_income: Decimal,
    ) -> IncomeTax {
        let gross_income = non_negative(gross_income);
        let personal_allowance = tapered_personal_allowance(
            gross_income,
            self.config.personal_allowance,
            self.config.taper_threshold,
        );
        let taxable_income = non_negative(gross_income - personal_allowance);

        let evaluation = BandEvaluator::new(&self.config.bands).evaluate(taxable_income);
        let tax = evaluation.total;

        let mut marginal_rate = self.config.bands.marginal_rate(taxable_income);
        if gross_income >= self.config.taper_threshold && personal_allowance > Decimal::ZERO {
            // each extra pound also removes 50p of allowance
            marginal_rate *= Decimal::new(15, 1);
        }

        debug!(%gross_income, %personal_allowance, %tax, "calculated income tax");

        IncomeTax {
            gross_income,
            personal_allowance,
            taxable_income,
            tax,
            net_income: gross_income - tax,
            effective_rate_percent: effective_rate(tax, gross_income),
            marginal_rate_percent: (marginal_rate * Decimal::ONE_HUNDRED).normalize(),
            breakdown: evaluation.breakdown,
        }
    }
}

impl Default for IncomeTaxCalculator {
    fn default() -> Self {
        Self::new(IncomeTaxConfig::default())
    }
}
