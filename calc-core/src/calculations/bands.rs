//! Progressive band evaluation.
//!
//! Income tax, dividend tax, stamp duty, National Insurance and student loan
//! repayments are all the same computation: slice an amount across an ordered
//! table of thresholds and charge each slice at its band's rate. This module
//! is that computation, parameterised by a [`BandTable`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use calc_core::calculations::BandEvaluator;
//! use calc_core::rates::UK_INCOME_TAX_BANDS_2024_25;
//!
//! let evaluation = BandEvaluator::new(&UK_INCOME_TAX_BANDS_2024_25).evaluate(dec!(80000));
//!
//! assert_eq!(evaluation.total, dec!(24460.00));
//! assert_eq!(evaluation.breakdown.len(), 2);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{non_negative, or_zero, round_half_up};
use crate::{BandTable, CalculationResult, ResultRow};

/// The portion of an evaluation that fell into one band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandBreakdown {
    pub label: String,
    /// How much of the evaluated amount lies in this band.
    pub taxable: Decimal,
    /// The charge for this band, rounded to pennies.
    pub amount: Decimal,
    pub rate: Decimal,
}

impl BandBreakdown {
    /// A display row such as `"Higher rate (40%)"` with the band's charge.
    pub fn to_row(&self) -> ResultRow {
        let percent = (self.rate * Decimal::ONE_HUNDRED).normalize();
        ResultRow::money(format!("{} ({}%)", self.label, percent), self.amount)
    }
}

/// Total and per-band breakdown of a band evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BandEvaluation {
    pub total: Decimal,
    pub breakdown: Vec<BandBreakdown>,
}

impl CalculationResult for BandEvaluation {
    fn title(&self) -> &'static str {
        "Band evaluation"
    }

    fn rows(&self) -> Vec<ResultRow> {
        let mut rows: Vec<ResultRow> = self.breakdown.iter().map(BandBreakdown::to_row).collect();
        rows.push(ResultRow::money("Total", self.total));
        rows
    }
}

/// Evaluates amounts against a [`BandTable`].
///
/// Bands whose charge is zero are left out of the breakdown by default; call
/// [`include_zero_rate_bands`](Self::include_zero_rate_bands) to list every
/// band the amount reaches (stamp duty statements show the 0% slice, income
/// tax statements do not).
#[derive(Debug, Clone)]
pub struct BandEvaluator<'a> {
    table: &'a BandTable,
    include_zero_rate: bool,
}

impl<'a> BandEvaluator<'a> {
    pub fn new(table: &'a BandTable) -> Self {
        Self {
            table,
            include_zero_rate: false,
        }
    }

    pub fn include_zero_rate_bands(
        mut self,
        include: bool,
    ) -> Self {
        self.include_zero_rate = include;
        self
    }

    /// Charges `amount` across the table, starting from zero.
    ///
    /// Negative amounts are treated as zero. The total is the exact sum of the
    /// rounded per-band charges.
    pub fn evaluate(
        &self,
        amount: Decimal,
    ) -> BandEvaluation {
        let mut remaining = non_negative(amount);
        let mut previous_threshold = Decimal::ZERO;
        let mut evaluation = BandEvaluation::default();

        for band in self.table.bands() {
            if remaining <= Decimal::ZERO {
                break;
            }

            let taxable_in_band = match band.upper_threshold {
                Some(upper) => remaining.min(upper - previous_threshold),
                None => remaining,
            };

            self.accrue(&mut evaluation, band.label.as_str(), taxable_in_band, band.rate);

            remaining -= taxable_in_band;
            if let Some(upper) = band.upper_threshold {
                previous_threshold = upper;
            }
        }

        debug!(%amount, total = %evaluation.total, "evaluated band table");
        evaluation
    }

    /// Charges only the slice of band space between `from` and `to`.
    ///
    /// Used when one kind of income sits on top of another: the lower income
    /// fills the bands first and the upper income is charged at whatever
    /// rates remain. Returns an empty evaluation when `to <= from`.
    pub fn evaluate_range(
        &self,
        from: Decimal,
        to: Decimal,
    ) -> BandEvaluation {
        let from = non_negative(from);
        let to = non_negative(to);
        let mut evaluation = BandEvaluation::default();
        if to <= from {
            return evaluation;
        }

        let mut lower = Decimal::ZERO;
        for band in self.table.bands() {
            let upper = band.upper_threshold;
            let slice_end = upper.map_or(to, |upper| upper.min(to));
            let slice_start = lower.max(from);
            if slice_end > slice_start {
                self.accrue(
                    &mut evaluation,
                    band.label.as_str(),
                    slice_end - slice_start,
                    band.rate,
                );
            }

            match upper {
                Some(upper) if upper < to => lower = upper,
                _ => break,
            }
        }

        debug!(%from, %to, total = %evaluation.total, "evaluated band range");
        evaluation
    }

    fn accrue(
        &self,
        evaluation: &mut BandEvaluation,
        label: &str,
        taxable: Decimal,
        rate: Decimal,
    ) {
        if taxable <= Decimal::ZERO {
            return;
        }

        let amount = round_half_up(or_zero(taxable.checked_mul(rate), label));
        evaluation.total = or_zero(evaluation.total.checked_add(amount), "band total");

        if amount > Decimal::ZERO || self.include_zero_rate {
            evaluation.breakdown.push(BandBreakdown {
                label: label.to_string(),
                taxable,
                amount,
                rate,
            });
        }
    }
}
