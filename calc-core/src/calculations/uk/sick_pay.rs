//! Statutory Sick Pay.
//!
//! SSP is a flat weekly rate paid for each qualifying day of sickness after
//! the first three (the waiting days), for at most 28 weeks. Employees whose
//! average weekly earnings are below the lower earnings limit do not qualify.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{non_negative, round_half_up};
use crate::{CalculationResult, ResultRow, ResultValue};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SickPayConfig {
    pub weekly_rate: Decimal,
    pub waiting_days: u32,
    pub max_weeks: u32,
    pub lower_earnings_limit: Decimal,
}

impl Default for SickPayConfig {
    fn default() -> Self {
        Self {
            weekly_rate: Decimal::new(11675, 2),
            waiting_days: 3,
            max_weeks: 28,
            lower_earnings_limit: Decimal::from(123),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SickPay {
    pub eligible: bool,
    pub daily_rate: Decimal,
    pub waiting_days: u32,
    pub paid_days: u32,
    pub amount: Decimal,
}

impl CalculationResult for SickPay {
    fn title(&self) -> &'static str {
        "Statutory Sick Pay"
    }

    fn rows(&self) -> Vec<ResultRow> {
        if !self.eligible {
            return vec![
                ResultRow::new("Eligible", ResultValue::Flag(false)),
                ResultRow::money("Sick pay", Decimal::ZERO),
            ];
        }
        vec![
            ResultRow::new("Eligible", ResultValue::Flag(true)),
            ResultRow::money("Daily rate", self.daily_rate),
            ResultRow::new("Waiting days", ResultValue::Count(self.waiting_days)),
            ResultRow::new("Days paid", ResultValue::Count(self.paid_days)),
            ResultRow::money("Sick pay", self.amount),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct SickPayCalculator {
    config: SickPayConfig,
}

impl SickPayCalculator {
    pub fn new(config: SickPayConfig) -> Self {
        Self { config }
    }

    /// `sick_days` counts qualifying days off sick in one period of
    /// incapacity; `qualifying_days_per_week` is the number of days the
    /// employee normally works (1 to 7).
    pub fn calculate(
        &self,
        average_weekly_earnings: Decimal,
        sick_days: u32,
        qualifying_days_per_week: u32,
    ) -> SickPay {
        let qualifying_days_per_week = qualifying_days_per_week.min(7);
        let eligible = non_negative(average_weekly_earnings) >= self.config.lower_earnings_limit
            && qualifying_days_per_week > 0;

        if !eligible {
            debug!(%average_weekly_earnings, qualifying_days_per_week, "not eligible for sick pay");
            return SickPay {
                eligible: false,
                daily_rate: Decimal::ZERO,
                waiting_days: 0,
                paid_days: 0,
                amount: Decimal::ZERO,
            };
        }

        let days_per_week = Decimal::from(qualifying_days_per_week);
        let max_days = self.config.max_weeks.saturating_mul(qualifying_days_per_week);
        let waiting_days = sick_days.min(self.config.waiting_days);
        let paid_days = sick_days.saturating_sub(waiting_days).min(max_days);
        let amount = round_half_up(self.config.weekly_rate * Decimal::from(paid_days) / days_per_week);

        debug!(sick_days, paid_days, %amount, "calculated sick pay");

        SickPay {
            eligible,
            daily_rate: round_half_up(self.config.weekly_rate / days_per_week),
            waiting_days,
            paid_days,
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
    fn two_weeks_off_after_waiting_days() {
        let result = SickPayCalculator::default().calculate(dec!(400), 10, 5);

        assert!(result.eligible);
        assert_eq!(result.daily_rate, dec!(23.35));
        assert_eq!(result.waiting_days, 3);
        assert_eq!(result.paid_days, 7);
        assert_eq!(result.amount, dec!(163.45));
    }

    #[test]
    fn short_absence_is_all_waiting_days() {
        let result = SickPayCalculator::default().calculate(dec!(400), 3, 5);

        assert_eq!(result.paid_days, 0);
        assert_eq!(result.amount, dec!(0));
    }

    #[test]
    fn capped_at_twenty_eight_weeks() {
        let result = SickPayCalculator::default().calculate(dec!(400), 200, 5);

        assert_eq!(result.paid_days, 140);
        assert_eq!(result.amount, dec!(3269.00));
    }

    #[test]
    fn earnings_below_lower_limit_are_not_eligible() {
        let result = SickPayCalculator::default().calculate(dec!(122.99), 10, 5);

        assert!(!result.eligible);
        assert_eq!(result.amount, dec!(0));
    }

    #[test]
    fn no_qualifying_days_is_not_eligible() {
        let result = SickPayCalculator::default().calculate(dec!(400), 10, 0);

        assert!(!result.eligible);
    }
}
