//! Savings growth: compound future value, simple interest and the rule of 72.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::{
    growth_factor, non_negative, or_zero, percent_to_rate, round_half_up,
};
use crate::{CalculationResult, ResultRow, ResultValue};

/// Longest projection accepted, in years.
pub const MAX_YEARS: u32 = 100;

/// Balance at the end of one whole year of a projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub year: u32,
    pub balance: Decimal,
    pub contributed: Decimal,
    pub interest: Decimal,
}

/// Result of [`future_value`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GrowthProjection {
    pub future_value: Decimal,
    pub total_principal: Decimal,
    pub total_interest: Decimal,
    /// One point per whole year from 0 to the projection length, for charting.
    pub yearly_series: Vec<GrowthPoint>,
}

impl CalculationResult for GrowthProjection {
    fn title(&self) -> &'static str {
        "Compound growth"
    }

    fn rows(&self) -> Vec<ResultRow> {
        vec![
            ResultRow::money("Future value", self.future_value),
            ResultRow::money("Total principal", self.total_principal),
            ResultRow::money("Total interest", self.total_interest),
        ]
    }
}

/// Projects a balance with monthly compounding and monthly contributions.
///
/// Contributions are made at the end of each month. At 0% the balance grows
/// linearly (`present_value + contribution * months`); this is a normal case,
/// not an error. Years beyond [`MAX_YEARS`] are capped. If the projection
/// overflows, a zeroed projection is returned and a warning is logged.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use calc_core::calculations::future_value;
///
/// let projection = future_value(dec!(1000), dec!(100), dec!(0), 2);
///
/// assert_eq!(projection.future_value, dec!(3400));
/// assert_eq!(projection.total_interest, dec!(0));
/// assert_eq!(projection.yearly_series.len(), 3);
/// ```
pub fn future_value(
    present_value: Decimal,
    monthly_contribution: Decimal,
    annual_rate_percent: Decimal,
    years: u32,
) -> GrowthProjection {
    let present_value = non_negative(present_value);
    let monthly_contribution = non_negative(monthly_contribution);
    let monthly_rate = percent_to_rate(non_negative(annual_rate_percent)) / Decimal::from(12);
    let years = years.min(MAX_YEARS);

    debug!(%present_value, %monthly_contribution, %annual_rate_percent, years, "projecting growth");

    let series: Option<Vec<GrowthPoint>> = (0..=years)
        .map(|year| balance_after(present_value, monthly_contribution, monthly_rate, year * 12))
        .collect();

    let Some(yearly_series) = series else {
        warn!(%present_value, %annual_rate_percent, years, "growth projection overflowed");
        return GrowthProjection::default();
    };

    let last = yearly_series
        .last()
        .cloned()
        .unwrap_or(GrowthPoint {
            year: 0,
            balance: present_value,
            contributed: present_value,
            interest: Decimal::ZERO,
        });

    GrowthProjection {
        future_value: last.balance,
        total_principal: last.contributed,
        total_interest: last.interest,
        yearly_series,
    }
}

fn balance_after(
    present_value: Decimal,
    monthly_contribution: Decimal,
    monthly_rate: Decimal,
    months: u32,
) -> Option<GrowthPoint> {
    let months_dec = Decimal::from(months);
    let contributed = present_value.checked_add(monthly_contribution.checked_mul(months_dec)?)?;

    let balance = if monthly_rate.is_zero() {
        contributed
    } else {
        let factor = growth_factor(monthly_rate, months)?;
        let grown_principal = present_value.checked_mul(factor)?;
        let annuity = factor.checked_sub(Decimal::ONE)?.checked_div(monthly_rate)?;
        grown_principal.checked_add(monthly_contribution.checked_mul(annuity)?)?
    };

    let balance = round_half_up(balance);
    let contributed = round_half_up(contributed);
    Some(GrowthPoint {
        year: months / 12,
        balance,
        contributed,
        interest: balance - contributed,
    })
}

/// Result of [`simple_interest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleInterest {
    pub principal: Decimal,
    pub total_interest: Decimal,
    pub final_amount: Decimal,
}

impl CalculationResult for SimpleInterest {
    fn title(&self) -> &'static str {
        "Simple interest"
    }

    fn rows(&self) -> Vec<ResultRow> {
        vec![
            ResultRow::money("Principal", self.principal),
            ResultRow::money("Total interest", self.total_interest),
            ResultRow::money("Final amount", self.final_amount),
        ]
    }
}

/// Interest on the original principal only: `principal * rate * years`.
///
/// Figures too large to represent give zero interest and a zero final amount.
pub fn simple_interest(
    principal: Decimal,
    annual_rate_percent: Decimal,
    years: Decimal,
) -> SimpleInterest {
    let principal = non_negative(principal);
    let rate = percent_to_rate(non_negative(annual_rate_percent));
    let interest = principal
        .checked_mul(rate)
        .and_then(|per_year| per_year.checked_mul(non_negative(years)))
        .map(round_half_up);
    let Some((total_interest, final_amount)) =
        interest.and_then(|interest| Some((interest, principal.checked_add(interest)?)))
    else {
        warn!(%principal, %annual_rate_percent, %years, "simple interest overflowed");
        return SimpleInterest {
            principal,
            total_interest: Decimal::ZERO,
            final_amount: Decimal::ZERO,
        };
    };

    SimpleInterest {
        principal,
        total_interest,
        final_amount,
    }
}

/// Result of [`rule_of_72`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoublingTime {
    pub annual_rate_percent: Decimal,
    /// Approximate years to double, rounded to two places. Zero when the rate
    /// is zero, since the money never doubles.
    pub years: Decimal,
}

impl CalculationResult for DoublingTime {
    fn title(&self) -> &'static str {
        "Rule of 72"
    }

    fn rows(&self) -> Vec<ResultRow> {
        vec![
            ResultRow::percent("Annual return", self.annual_rate_percent),
            ResultRow::new("Years to double", ResultValue::Years(self.years)),
        ]
    }
}

/// Approximate doubling time: `72 / rate`.
pub fn rule_of_72(annual_rate_percent: Decimal) -> DoublingTime {
    let annual_rate_percent = non_negative(annual_rate_percent);
    let years = if annual_rate_percent.is_zero() {
        Decimal::ZERO
    } else {
        round_half_up(or_zero(
            Decimal::from(72).checked_div(annual_rate_percent),
            "rule of 72",
        ))
    };

    DoublingTime {
        annual_rate_percent,
        years,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::{prop_assert, proptest};
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // future_value tests
    // =========================================================================

    #[test]
    fn future_value_compounds_lump_sum_monthly() {
        let projection = future_value(dec!(10000), dec!(0), dec!(12), 1);

        // 10000 * 1.01^12 = 11268.25
        assert_eq!(projection.future_value, dec!(11268.25));
        assert_eq!(projection.total_principal, dec!(10000));
        assert_eq!(projection.total_interest, dec!(1268.25));
    }

    #[test]
    fn future_value_adds_ordinary_annuity_contributions() {
        let projection = future_value(dec!(0), dec!(100), dec!(12), 1);

        // 100 * (1.01^12 - 1) / 0.01 = 1268.25
        assert_eq!(projection.future_value, dec!(1268.25));
        assert_eq!(projection.total_principal, dec!(1200));
        assert_eq!(projection.total_interest, dec!(68.25));
    }

    #[test]
    fn future_value_zero_rate_is_linear() {
        let projection = future_value(dec!(500), dec!(250), dec!(0), 3);

        assert_eq!(projection.future_value, dec!(9500));
        assert_eq!(projection.total_interest, dec!(0));
    }

    #[test]
    fn future_value_series_has_one_point_per_year() {
        let projection = future_value(dec!(1000), dec!(50), dec!(5), 10);

        assert_eq!(projection.yearly_series.len(), 11);
        assert_eq!(projection.yearly_series[0].year, 0);
        assert_eq!(projection.yearly_series[0].balance, dec!(1000));
        assert_eq!(projection.yearly_series[10].balance, projection.future_value);
    }

    #[test]
    fn future_value_zero_years_returns_present_value() {
        let projection = future_value(dec!(2500), dec!(100), dec!(4), 0);

        assert_eq!(projection.future_value, dec!(2500));
        assert_eq!(projection.yearly_series.len(), 1);
    }

    #[test]
    fn future_value_negative_inputs_degrade_to_zero() {
        let projection = future_value(dec!(-100), dec!(-10), dec!(-5), 2);

        assert_eq!(projection.future_value, dec!(0));
        assert_eq!(projection.total_principal, dec!(0));
    }

    #[test]
    fn future_value_caps_years() {
        let projection = future_value(dec!(1), dec!(0), dec!(0), 500);

        assert_eq!(projection.yearly_series.len(), (MAX_YEARS + 1) as usize);
    }

    #[test]
    fn future_value_overflow_degrades_to_zeroed_projection() {
        let projection = future_value(dec!(1000000000), dec!(0), dec!(100000), 100);

        assert_eq!(projection, GrowthProjection::default());
    }

    // =========================================================================
    // simple_interest tests
    // =========================================================================

    #[test]
    fn simple_interest_ten_years_at_five_percent() {
        let result = simple_interest(dec!(10000), dec!(5), dec!(10));

        assert_eq!(result.total_interest, dec!(5000));
        assert_eq!(result.final_amount, dec!(15000));
    }

    #[test]
    fn simple_interest_overflow_degrades_to_zero() {
        let result = simple_interest(dec!(100000000000000000000), dec!(1000), dec!(100000000));

        assert_eq!(result.principal, dec!(100000000000000000000));
        assert_eq!(result.total_interest, dec!(0));
        assert_eq!(result.final_amount, dec!(0));
    }

    #[test]
    fn simple_interest_supports_part_years() {
        let result = simple_interest(dec!(1000), dec!(6), dec!(0.5));

        assert_eq!(result.total_interest, dec!(30.00));
    }

    // =========================================================================
    // rule_of_72 tests
    // =========================================================================

    #[test]
    fn rule_of_72_at_seven_percent() {
        assert_eq!(rule_of_72(dec!(7)).years, dec!(10.29));
    }

    #[test]
    fn rule_of_72_zero_rate_is_zero() {
        assert_eq!(rule_of_72(dec!(0)).years, dec!(0));
    }

    #[test]
    fn rule_of_72_vanishing_rate_does_not_overflow() {
        assert_eq!(rule_of_72(dec!(0.0000000000000000000000000001)).years, dec!(0));
    }

    // =========================================================================
    // properties
    // =========================================================================

    proptest! {
        #[test]
        fn prop_tiny_rate_converges_to_linear_branch(
            pv in 0u32..1_000_000,
            contribution in 0u32..5_000,
            years in 0u32..40,
        ) {
            let pv = Decimal::from(pv);
            let contribution = Decimal::from(contribution);

            let linear = future_value(pv, contribution, Decimal::ZERO, years);
            let tiny = future_value(pv, contribution, dec!(0.000001), years);

            let gap = (tiny.future_value - linear.future_value).abs();
            prop_assert!(gap <= dec!(1.00), "gap {} too large", gap);
            prop_assert!(tiny.future_value >= linear.future_value);
        }

        #[test]
        fn prop_balance_grows_year_on_year(
            pv in 0u32..100_000,
            contribution in 0u32..2_000,
            rate_bp in 0u32..1500,
        ) {
            let projection = future_value(
                Decimal::from(pv),
                Decimal::from(contribution),
                Decimal::new(i64::from(rate_bp), 2),
                30,
            );

            for pair in projection.yearly_series.windows(2) {
                prop_assert!(pair[1].balance >= pair[0].balance);
            }
        }
    }
}
