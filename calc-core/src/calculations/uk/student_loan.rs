//! Student loan repayments.
//!
//! Each plan is a two-band table: nothing below the plan threshold, a flat
//! rate on everything above it. A postgraduate loan is repaid alongside an
//! undergraduate plan, each against its own threshold. Holding more than one
//! undergraduate plan still means one 9% deduction, taken above the lowest
//! of their thresholds.
//!
//! | Plan | Threshold | Rate |
//! |------|-----------|------|
//! | Plan 1 | £24,990 | 9% |
//! | Plan 2 | £27,295 | 9% |
//! | Plan 4 | £31,395 | 9% |
//! | Plan 5 | £25,000 | 9% |
//! | Postgraduate | £21,000 | 6% |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::bands::BandEvaluator;
use crate::calculations::common::{non_negative, or_zero, round_half_up};
use crate::{Band, BandTable, BandTableError, CalculationResult, ResultRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudentLoanPlan {
    Plan1,
    Plan2,
    Plan4,
    Plan5,
    Postgraduate,
}

impl StudentLoanPlan {
    pub fn all() -> &'static [StudentLoanPlan] {
        &[
            StudentLoanPlan::Plan1,
            StudentLoanPlan::Plan2,
            StudentLoanPlan::Plan4,
            StudentLoanPlan::Plan5,
            StudentLoanPlan::Postgraduate,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plan1 => "plan-1",
            Self::Plan2 => "plan-2",
            Self::Plan4 => "plan-4",
            Self::Plan5 => "plan-5",
            Self::Postgraduate => "postgraduate",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Plan1 => "Plan 1",
            Self::Plan2 => "Plan 2",
            Self::Plan4 => "Plan 4",
            Self::Plan5 => "Plan 5",
            Self::Postgraduate => "Postgraduate loan",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "plan-1" | "1" => Some(Self::Plan1),
            "plan-2" | "2" => Some(Self::Plan2),
            "plan-4" | "4" => Some(Self::Plan4),
            "plan-5" | "5" => Some(Self::Plan5),
            "postgraduate" | "pg" => Some(Self::Postgraduate),
            _ => None,
        }
    }
}

/// Repayment thresholds and rates, 2024/25.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentLoanConfig {
    pub plan_1_threshold: Decimal,
    pub plan_2_threshold: Decimal,
    pub plan_4_threshold: Decimal,
    pub plan_5_threshold: Decimal,
    pub postgraduate_threshold: Decimal,
    pub undergraduate_rate: Decimal,
    pub postgraduate_rate: Decimal,
}

impl Default for StudentLoanConfig {
    fn default() -> Self {
        Self {
            plan_1_threshold: Decimal::from(24_990),
            plan_2_threshold: Decimal::from(27_295),
            plan_4_threshold: Decimal::from(31_395),
            plan_5_threshold: Decimal::from(25_000),
            postgraduate_threshold: Decimal::from(21_000),
            undergraduate_rate: Decimal::new(9, 2),
            postgraduate_rate: Decimal::new(6, 2),
        }
    }
}

impl StudentLoanConfig {
    pub fn threshold(
        &self,
        plan: StudentLoanPlan,
    ) -> Decimal {
        match plan {
            StudentLoanPlan::Plan1 => self.plan_1_threshold,
            StudentLoanPlan::Plan2 => self.plan_2_threshold,
            StudentLoanPlan::Plan4 => self.plan_4_threshold,
            StudentLoanPlan::Plan5 => self.plan_5_threshold,
            StudentLoanPlan::Postgraduate => self.postgraduate_threshold,
        }
    }

    pub fn rate(
        &self,
        plan: StudentLoanPlan,
    ) -> Decimal {
        match plan {
            StudentLoanPlan::Postgraduate => self.postgraduate_rate,
            _ => self.undergraduate_rate,
        }
    }

    fn table(
        &self,
        plan: StudentLoanPlan,
    ) -> Result<BandTable, BandTableError> {
        BandTable::new(vec![
            Band::new("Below threshold", Some(self.threshold(plan)), Decimal::ZERO),
            Band::new(plan.display_name(), None, self.rate(plan)),
        ])
    }
}

/// One plan's share of a [`StudentLoanRepayment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRepayment {
    pub plan: StudentLoanPlan,
    pub threshold: Decimal,
    pub annual: Decimal,
    pub monthly: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentLoanRepayment {
    pub income: Decimal,
    pub repayments: Vec<PlanRepayment>,
    pub annual_total: Decimal,
    pub monthly_total: Decimal,
}

impl CalculationResult for StudentLoanRepayment {
    fn title(&self) -> &'static str {
        "Student loan repayment"
    }

    fn rows(&self) -> Vec<ResultRow> {
        let mut rows = vec![ResultRow::money("Annual income", self.income)];
        for repayment in &self.repayments {
            let name = repayment.plan.display_name();
            rows.push(ResultRow::money(format!("{name} threshold"), repayment.threshold));
            rows.push(ResultRow::money(format!("{name} annual"), repayment.annual));
        }
        rows.push(ResultRow::money("Annual repayment", self.annual_total));
        rows.push(ResultRow::money("Monthly repayment", self.monthly_total));
        rows
    }
}

#[derive(Debug, Clone)]
pub struct StudentLoanCalculator {
    tables: Vec<(StudentLoanPlan, Decimal, BandTable)>,
}

impl StudentLoanCalculator {
    /// # Errors
    ///
    /// Returns [`BandTableError`] if a threshold is not positive or a rate is
    /// outside `[0, 1]`.
    pub fn new(config: StudentLoanConfig) -> Result<Self, BandTableError> {
        let tables = StudentLoanPlan::all()
            .iter()
            .map(|&plan| Ok((plan, config.threshold(plan), config.table(plan)?)))
            .collect::<Result<Vec<_>, BandTableError>>()?;

        Ok(Self { tables })
    }

    /// Repayments on `income` for the plans in `plans`. A plan listed twice
    /// is only charged once. When more than one undergraduate plan is
    /// selected, one deduction is taken, against the lowest of their
    /// thresholds; a postgraduate loan is always charged separately.
    pub fn calculate(
        &self,
        income: Decimal,
        plans: &[StudentLoanPlan],
    ) -> StudentLoanRepayment {
        let income = non_negative(income);

        let (postgraduate, undergraduate): (Vec<_>, Vec<_>) = self
            .tables
            .iter()
            .filter(|(plan, _, _)| plans.contains(plan))
            .partition(|(plan, _, _)| *plan == StudentLoanPlan::Postgraduate);
        let undergraduate = undergraduate.into_iter().min_by_key(|(_, threshold, _)| *threshold);

        let repayments: Vec<PlanRepayment> = undergraduate
            .into_iter()
            .chain(postgraduate)
            .map(|(plan, threshold, table)| {
                let annual = BandEvaluator::new(table).evaluate(income).total;
                PlanRepayment {
                    plan: *plan,
                    threshold: *threshold,
                    annual,
                    monthly: round_half_up(annual / Decimal::from(12)),
                }
            })
            .collect();

        let annual_total = repayments
            .iter()
            .try_fold(Decimal::ZERO, |total, r| total.checked_add(r.annual));
        let annual_total = or_zero(annual_total, "student loan total");
        debug!(%income, plans = repayments.len(), %annual_total, "calculated student loan");

        StudentLoanRepayment {
            income,
            repayments,
            annual_total,
            monthly_total: round_half_up(annual_total / Decimal::from(12)),
        }
    }
}
