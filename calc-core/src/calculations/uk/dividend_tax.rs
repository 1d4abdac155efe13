//! Dividend tax.
//!
//! Dividends are treated as the top slice of income. Other income fills the
//! personal allowance and the bands first; any unused allowance then covers
//! dividends, followed by the dividend allowance, which is taxed at 0% but
//! still uses up band space. What is left is charged at the dividend rates
//! for whichever bands it lands in.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::calculations::bands::{BandBreakdown, BandEvaluator};
use crate::calculations::common::non_negative;
use crate::calculations::uk::income_tax::tapered_personal_allowance;
use crate::rates::{
    DIVIDEND_ALLOWANCE, PERSONAL_ALLOWANCE, PERSONAL_ALLOWANCE_TAPER_THRESHOLD,
    UK_DIVIDEND_TAX_BANDS_2024_25,
};
use crate::{BandTable, CalculationResult, ResultRow};

/// Rates and thresholds for [`DividendTaxCalculator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DividendTaxConfig {
    pub personal_allowance: Decimal,
    pub taper_threshold: Decimal,
    /// Dividends taxed at 0% after the personal allowance.
    pub dividend_allowance: Decimal,
    pub bands: BandTable,
}

impl Default for DividendTaxConfig {
    fn default() -> Self {
        Self {
            personal_allowance: PERSONAL_ALLOWANCE,
            taper_threshold: PERSONAL_ALLOWANCE_TAPER_THRESHOLD,
            dividend_allowance: DIVIDEND_ALLOWANCE,
            bands: UK_DIVIDEND_TAX_BANDS_2024_25.clone(),
        }
    }
}

/// Result of [`DividendTaxCalculator::calculate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DividendTax {
    pub dividends: Decimal,
    /// Part of the personal allowance left over for dividends.
    pub personal_allowance_used: Decimal,
    pub dividend_allowance_used: Decimal,
    pub taxable_dividends: Decimal,
    pub tax: Decimal,
    pub breakdown: Vec<BandBreakdown>,
}

impl CalculationResult for DividendTax {
    fn title(&self) -> &'static str {
        "Dividend tax"
    }

    fn rows(&self) -> Vec<ResultRow> {
        let mut rows = vec![ResultRow::money("Dividends", self.dividends)];
        if self.personal_allowance_used > Decimal::ZERO {
            rows.push(ResultRow::money(
                "Covered by personal allowance",
                self.personal_allowance_used,
            ));
        }
        rows.push(ResultRow::money("Dividend allowance", self.dividend_allowance_used));
        rows.push(ResultRow::money("Taxable dividends", self.taxable_dividends));
        rows.extend(self.breakdown.iter().map(BandBreakdown::to_row));
        rows.push(ResultRow::money("Dividend tax", self.tax));
        rows
    }
}

/// Calculates tax on dividends received alongside other income.
#[derive(Debug, Clone)]
pub struct DividendTaxCalculator {
    config: DividendTaxConfig,
}

impl DividendTaxCalculator {
    pub fn new(config: DividendTaxConfig) -> Self {
        Self { config }
    }

    /// `other_income` is salary, pension and other non-savings income for
    /// the year; `dividends` is the gross dividend total.
    pub fn calculate(
        &self,
        other_income: Decimal,
        dividends: Decimal,
    ) -> DividendTax {
        let other_income = non_negative(other_income);
        let dividends = non_negative(dividends);

        let allowance = tapered_personal_allowance(
            other_income.saturating_add(dividends),
            self.config.personal_allowance,
            self.config.taper_threshold,
        );
        let other_taxable = non_negative(other_income - allowance);
        let unused_allowance = non_negative(allowance - other_income);

        let personal_allowance_used = dividends.min(unused_allowance);
        let after_allowance = dividends - personal_allowance_used;
        let dividend_allowance_used = after_allowance.min(non_negative(self.config.dividend_allowance));
        let taxable_dividends = after_allowance - dividend_allowance_used;

        // the dividend allowance occupies band space from the bottom of the
        // dividend slice
        let from = other_taxable.saturating_add(dividend_allowance_used);
        let to = other_taxable.saturating_add(after_allowance);
        let evaluation = BandEvaluator::new(&self.config.bands).evaluate_range(from, to);

        debug!(%other_income, %dividends, tax = %evaluation.total, "calculated dividend tax");

        DividendTax {
            dividends,
            personal_allowance_used,
            dividend_allowance_used,
            taxable_dividends,
            tax: evaluation.total,
            breakdown: evaluation.breakdown,
        }
    }
}

impl Default for DividendTaxCalculator {
    fn default() -> Self {
        Self::new(DividendTaxConfig::default())
    }
}
