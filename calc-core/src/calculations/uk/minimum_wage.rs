//! National Minimum Wage and National Living Wage check, from April 2024.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{non_negative, or_zero, round_half_up};
use crate::{CalculationResult, ResultRow, ResultValue};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumWageConfig {
    /// National Living Wage, age 21 and over.
    pub rate_21_and_over: Decimal,
    pub rate_18_to_20: Decimal,
    pub rate_under_18: Decimal,
    pub apprentice_rate: Decimal,
}

impl Default for MinimumWageConfig {
    fn default() -> Self {
        Self {
            rate_21_and_over: Decimal::new(1144, 2),
            rate_18_to_20: Decimal::new(860, 2),
            rate_under_18: Decimal::new(640, 2),
            apprentice_rate: Decimal::new(640, 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumWageCheck {
    pub rate_name: String,
    pub minimum_rate: Decimal,
    pub hourly_pay: Decimal,
    pub compliant: bool,
    pub hourly_shortfall: Decimal,
    pub weekly_shortfall: Decimal,
}

impl CalculationResult for MinimumWageCheck {
    fn title(&self) -> &'static str {
        "Minimum wage check"
    }

    fn rows(&self) -> Vec<ResultRow> {
        let mut rows = vec![
            ResultRow::new("Applicable rate", ResultValue::Text(self.rate_name.clone())),
            ResultRow::money("Minimum hourly rate", self.minimum_rate),
            ResultRow::money("Hourly pay", self.hourly_pay),
            ResultRow::new("Meets minimum", ResultValue::Flag(self.compliant)),
        ];
        if !self.compliant {
            rows.push(ResultRow::money("Hourly shortfall", self.hourly_shortfall));
            rows.push(ResultRow::money("Weekly shortfall", self.weekly_shortfall));
        }
        rows
    }
}

#[derive(Debug, Clone, Default)]
pub struct MinimumWageCalculator {
    config: MinimumWageConfig,
}

impl MinimumWageCalculator {
    pub fn new(config: MinimumWageConfig) -> Self {
        Self { config }
    }

    /// The rate that applies to a worker, and its name.
    pub fn applicable_rate(
        &self,
        age: u32,
        apprentice: bool,
    ) -> (&'static str, Decimal) {
        match age {
            _ if apprentice => ("Apprentice", self.config.apprentice_rate),
            21.. => ("National Living Wage (21 and over)", self.config.rate_21_and_over),
            18..=20 => ("18 to 20", self.config.rate_18_to_20),
            _ => ("Under 18", self.config.rate_under_18),
        }
    }

    pub fn calculate(
        &self,
        age: u32,
        hourly_pay: Decimal,
        weekly_hours: Decimal,
        apprentice: bool,
    ) -> MinimumWageCheck {
        let hourly_pay = non_negative(hourly_pay);
        let (rate_name, minimum_rate) = self.applicable_rate(age, apprentice);
        let hourly_shortfall = non_negative(minimum_rate - hourly_pay);

        debug!(age, apprentice, %hourly_pay, %minimum_rate, "checked minimum wage");

        MinimumWageCheck {
            rate_name: rate_name.to_string(),
            minimum_rate,
            hourly_pay,
            compliant: hourly_shortfall.is_zero(),
            hourly_shortfall,
            weekly_shortfall: round_half_up(or_zero(
                hourly_shortfall.checked_mul(non_negative(weekly_hours)),
                "weekly shortfall",
            )),
        }
    }
}
