//! National Insurance contributions on annual earnings or profits.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::bands::{BandBreakdown, BandEvaluator};
use crate::calculations::common::non_negative;
use crate::rates::{UK_NI_CLASS_1_EMPLOYEE_BANDS_2024_25, UK_NI_CLASS_4_SELF_EMPLOYED_BANDS_2024_25};
use crate::{BandTable, CalculationResult, ResultRow};

/// Contribution class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NiClass {
    /// Class 1 primary contributions, deducted from an employee's pay.
    Employee,
    /// Class 4 contributions on self-employed profits.
    SelfEmployed,
}

impl NiClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::SelfEmployed => "self-employed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "employee" | "class-1" => Some(Self::Employee),
            "self-employed" | "class-4" => Some(Self::SelfEmployed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NationalInsuranceConfig {
    pub class_1_bands: BandTable,
    pub class_4_bands: BandTable,
}

impl Default for NationalInsuranceConfig {
    fn default() -> Self {
        Self {
            class_1_bands: UK_NI_CLASS_1_EMPLOYEE_BANDS_2024_25.clone(),
            class_4_bands: UK_NI_CLASS_4_SELF_EMPLOYED_BANDS_2024_25.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NationalInsurance {
    pub earnings: Decimal,
    pub class: NiClass,
    pub contributions: Decimal,
    pub breakdown: Vec<BandBreakdown>,
}

impl CalculationResult for NationalInsurance {
    fn title(&self) -> &'static str {
        match self.class {
            NiClass::Employee => "National Insurance (Class 1)",
            NiClass::SelfEmployed => "National Insurance (Class 4)",
        }
    }

    fn rows(&self) -> Vec<ResultRow> {
        let mut rows = vec![ResultRow::money("Earnings", self.earnings)];
        rows.extend(self.breakdown.iter().map(BandBreakdown::to_row));
        rows.push(ResultRow::money("Total contributions", self.contributions));
        rows.push(ResultRow::money(
            "Earnings after NI",
            self.earnings - self.contributions,
        ));
        rows
    }
}

#[derive(Debug, Clone, Default)]
pub struct NationalInsuranceCalculator {
    config: NationalInsuranceConfig,
}

impl NationalInsuranceCalculator {
    pub fn new(config: NationalInsuranceConfig) -> Self {
        Self { config }
    }

    pub fn calculate(
        &self,
        earnings: Decimal,
        class: NiClass,
    ) -> NationalInsurance {
        let earnings = non_negative(earnings);
        let bands = match class {
            NiClass::Employee => &self.config.class_1_bands,
            NiClass::SelfEmployed => &self.config.class_4_bands,
        };
        let evaluation = BandEvaluator::new(bands).evaluate(earnings);

        debug!(%earnings, class = class.as_str(), total = %evaluation.total, "calculated national insurance");

        NationalInsurance {
            earnings,
            class,
            contributions: evaluation.total,
            breakdown: evaluation.breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn employee_above_upper_earnings_limit() {
        let result = NationalInsuranceCalculator::default().calculate(dec!(60000), NiClass::Employee);

        assert_eq!(result.contributions, dec!(3210.60));
        assert_eq!(result.breakdown.len(), 2);
        assert_eq!(result.breakdown[0].amount, dec!(3016.00));
        assert_eq!(result.breakdown[1].amount, dec!(194.60));
    }

    #[test]
    fn self_employed_above_upper_profits_limit() {
        let result =
            NationalInsuranceCalculator::default().calculate(dec!(60000), NiClass::SelfEmployed);

        assert_eq!(result.contributions, dec!(2456.60));
    }

    #[test]
    fn earnings_below_primary_threshold_pay_nothing() {
        let result = NationalInsuranceCalculator::default().calculate(dec!(12000), NiClass::Employee);

        assert_eq!(result.contributions, dec!(0));
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn main_rate_only() {
        let result = NationalInsuranceCalculator::default().calculate(dec!(30000), NiClass::Employee);

        // (30000 - 12570) * 8%
        assert_eq!(result.contributions, dec!(1394.40));
    }

    #[test]
    fn class_parses_aliases() {
        assert_eq!(NiClass::parse("class-4"), Some(NiClass::SelfEmployed));
        assert_eq!(NiClass::parse(NiClass::Employee.as_str()), Some(NiClass::Employee));
        assert_eq!(NiClass::parse("class-2"), None);
    }
}
