//! Statutory redundancy pay.
//!
//! Counting back from the employee's current age, each complete year of
//! service (up to the most recent 20) earns a number of weeks' pay that
//! depends on the age the employee was during that year:
//!
//! | Age during year | Weeks' pay |
//! |-----------------|------------|
//! | under 22 | 0.5 |
//! | 22 to 40 | 1 |
//! | 41 and over | 1.5 |
//!
//! Weekly pay is capped, and employees with less than two years' service are
//! not entitled.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{non_negative, or_zero, round_half_up};
use crate::{CalculationResult, ResultRow, ResultValue};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedundancyConfig {
    pub weekly_pay_cap: Decimal,
    pub max_years_counted: u32,
    pub min_years_service: u32,
    /// First age at which a year earns a full week.
    pub full_week_age: u32,
    /// First age at which a year earns one and a half weeks.
    pub enhanced_week_age: u32,
}

impl Default for RedundancyConfig {
    fn default() -> Self {
        Self {
            weekly_pay_cap: Decimal::from(700),
            max_years_counted: 20,
            min_years_service: 2,
            full_week_age: 22,
            enhanced_week_age: 41,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedundancyPay {
    pub eligible: bool,
    pub years_counted: u32,
    pub weeks_entitlement: Decimal,
    /// Weekly pay after the statutory cap.
    pub weekly_pay_used: Decimal,
    pub amount: Decimal,
}

impl CalculationResult for RedundancyPay {
    fn title(&self) -> &'static str {
        "Statutory redundancy pay"
    }

    fn rows(&self) -> Vec<ResultRow> {
        if !self.eligible {
            return vec![
                ResultRow::new("Eligible", ResultValue::Flag(false)),
                ResultRow::money("Redundancy pay", Decimal::ZERO),
            ];
        }
        vec![
            ResultRow::new("Eligible", ResultValue::Flag(true)),
            ResultRow::new("Years counted", ResultValue::Count(self.years_counted)),
            ResultRow::new("Weeks' pay", ResultValue::Weeks(self.weeks_entitlement)),
            ResultRow::money("Weekly pay used", self.weekly_pay_used),
            ResultRow::money("Redundancy pay", self.amount),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct RedundancyCalculator {
    config: RedundancyConfig,
}

impl RedundancyCalculator {
    pub fn new(config: RedundancyConfig) -> Self {
        Self { config }
    }

    /// Weeks of pay earned by one year of service spent at `age`.
    pub fn weeks_for_age(
        &self,
        age: u32,
    ) -> Decimal {
        if age >= self.config.enhanced_week_age {
            Decimal::new(15, 1)
        } else if age >= self.config.full_week_age {
            Decimal::ONE
        } else {
            Decimal::new(5, 1)
        }
    }

    /// `age` is the employee's age at redundancy and `years_of_service` the
    /// number of complete years worked.
    pub fn calculate(
        &self,
        age: u32,
        years_of_service: u32,
        weekly_pay: Decimal,
    ) -> RedundancyPay {
        let weekly_pay_used = non_negative(weekly_pay).min(self.config.weekly_pay_cap);

        if years_of_service < self.config.min_years_service {
            debug!(years_of_service, "not eligible for redundancy pay");
            return RedundancyPay {
                eligible: false,
                years_counted: 0,
                weeks_entitlement: Decimal::ZERO,
                weekly_pay_used,
                amount: Decimal::ZERO,
            };
        }

        let years_counted = years_of_service.min(self.config.max_years_counted);
        let weeks_entitlement: Decimal = (0..years_counted)
            .map(|year| self.weeks_for_age(age.saturating_sub(1 + year)))
            .sum();
        let amount = weeks_entitlement.checked_mul(weekly_pay_used);
        let amount = round_half_up(or_zero(amount, "redundancy pay"));

        debug!(age, years_counted, %weeks_entitlement, %amount, "calculated redundancy pay");

        RedundancyPay {
            eligible: true,
            years_counted,
            weeks_entitlement,
            weekly_pay_used,
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn older_employee_with_capped_pay() {
        // ages 44..41 earn 1.5 weeks, 40..35 earn 1 week
        let result = RedundancyCalculator::default().calculate(45, 10, dec!(800));

        assert_eq!(result.weeks_entitlement, dec!(12));
        assert_eq!(result.weekly_pay_used, dec!(700));
        assert_eq!(result.amount, dec!(8400));
    }

    #[test]
    fn mid_career_employee() {
        let result = RedundancyCalculator::default().calculate(30, 5, dec!(500));

        assert_eq!(result.weeks_entitlement, dec!(5));
        assert_eq!(result.amount, dec!(2500));
    }

    #[test]
    fn years_under_22_earn_half_a_week() {
        // age 22 earns 1 week, ages 21..19 earn 0.5 each
        let result = RedundancyCalculator::default().calculate(23, 4, dec!(400));

        assert_eq!(result.weeks_entitlement, dec!(2.5));
        assert_eq!(result.amount, dec!(1000));
    }

    #[test]
    fn only_most_recent_twenty_years_count() {
        let result = RedundancyCalculator::default().calculate(64, 30, dec!(700));

        assert_eq!(result.years_counted, 20);
        assert_eq!(result.weeks_entitlement, dec!(30));
        assert_eq!(result.amount, dec!(21000));
    }

    #[test]
    fn under_two_years_is_not_eligible() {
        let result = RedundancyCalculator::default().calculate(35, 1, dec!(600));

        assert!(!result.eligible);
        assert_eq!(result.amount, dec!(0));
        assert_eq!(result.rows().len(), 2);
    }

    #[test]
    fn weeks_for_age_boundaries() {
        let calculator = RedundancyCalculator::default();

        assert_eq!(calculator.weeks_for_age(21), dec!(0.5));
        assert_eq!(calculator.weeks_for_age(22), dec!(1));
        assert_eq!(calculator.weeks_for_age(40), dec!(1));
        assert_eq!(calculator.weeks_for_age(41), dec!(1.5));
    }
}
