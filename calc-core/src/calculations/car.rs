//! Total cost of owning a car.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::{non_negative, optional_div, round_half_up};
use crate::{CalculationResult, ResultRow};

/// Inputs for [`car_cost`]. Running costs are per year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarCostInput {
    pub purchase_price: Decimal,
    pub resale_value: Decimal,
    pub ownership_years: u32,
    pub annual_fuel: Decimal,
    pub annual_insurance: Decimal,
    pub annual_maintenance: Decimal,
    pub annual_road_tax: Decimal,
    pub annual_mileage: Decimal,
}

/// Result of [`car_cost`].
///
/// Per-period figures are `None` when the ownership period is zero and the
/// per-mile figure is `None` when no mileage is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarCost {
    pub depreciation: Decimal,
    pub running_costs: Decimal,
    pub total_cost: Decimal,
    pub cost_per_year: Option<Decimal>,
    pub cost_per_month: Option<Decimal>,
    pub cost_per_mile: Option<Decimal>,
}

impl CalculationResult for CarCost {
    fn title(&self) -> &'static str {
        "Car cost of ownership"
    }

    fn rows(&self) -> Vec<ResultRow> {
        let mut rows = vec![
            ResultRow::money("Depreciation", self.depreciation),
            ResultRow::money("Running costs", self.running_costs),
            ResultRow::money("Total cost", self.total_cost),
        ];
        if let Some(per_year) = self.cost_per_year {
            rows.push(ResultRow::money("Cost per year", per_year));
        }
        if let Some(per_month) = self.cost_per_month {
            rows.push(ResultRow::money("Cost per month", per_month));
        }
        if let Some(per_mile) = self.cost_per_mile {
            rows.push(ResultRow::money("Cost per mile", per_mile));
        }
        rows
    }
}

/// Depreciation plus running costs over the ownership period.
///
/// Figures too large to represent give a zeroed result.
pub fn car_cost(input: &CarCostInput) -> CarCost {
    let years = Decimal::from(input.ownership_years);
    let depreciation =
        non_negative(non_negative(input.purchase_price) - non_negative(input.resale_value));

    let Some((running_costs, total_cost, total_miles)) = car_totals(input, depreciation, years)
    else {
        warn!(%depreciation, years = input.ownership_years, "car cost overflowed");
        return CarCost {
            depreciation: Decimal::ZERO,
            running_costs: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            cost_per_year: None,
            cost_per_month: None,
            cost_per_mile: None,
        };
    };

    debug!(%depreciation, %running_costs, years = input.ownership_years, "calculated car cost");

    CarCost {
        depreciation,
        running_costs,
        total_cost,
        cost_per_year: optional_div(total_cost, years).map(round_half_up),
        cost_per_month: optional_div(total_cost, years * Decimal::from(12)).map(round_half_up),
        cost_per_mile: optional_div(total_cost, total_miles).map(round_half_up),
    }
}

/// Running costs, total cost and total miles, or `None` on overflow.
fn car_totals(
    input: &CarCostInput,
    depreciation: Decimal,
    years: Decimal,
) -> Option<(Decimal, Decimal, Decimal)> {
    let annual_running = [
        input.annual_fuel,
        input.annual_insurance,
        input.annual_maintenance,
        input.annual_road_tax,
    ]
    .into_iter()
    .try_fold(Decimal::ZERO, |total, cost| total.checked_add(non_negative(cost)))?;

    let running_costs = round_half_up(annual_running.checked_mul(years)?);
    let total_cost = round_half_up(depreciation.checked_add(running_costs)?);
    let total_miles = non_negative(input.annual_mileage).checked_mul(years)?;
    Some((running_costs, total_cost, total_miles))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn input() -> CarCostInput {
        CarCostInput {
            purchase_price: dec!(20000),
            resale_value: dec!(8000),
            ownership_years: 4,
            annual_fuel: dec!(1200),
            annual_insurance: dec!(600),
            annual_maintenance: dec!(400),
            annual_road_tax: dec!(180),
            annual_mileage: dec!(8000),
        }
    }

    #[test]
    fn four_years_of_ownership() {
        let result = car_cost(&input());

        assert_eq!(result.depreciation, dec!(12000));
        assert_eq!(result.running_costs, dec!(9520));
        assert_eq!(result.total_cost, dec!(21520));
        assert_eq!(result.cost_per_year, Some(dec!(5380)));
        assert_eq!(result.cost_per_month, Some(dec!(448.33)));
        assert_eq!(result.cost_per_mile, Some(dec!(0.67)));
    }

    #[test]
    fn zero_mileage_omits_cost_per_mile() {
        let result = car_cost(&CarCostInput {
            annual_mileage: dec!(0),
            ..input()
        });

        assert_eq!(result.cost_per_mile, None);
        assert_eq!(result.rows().len(), 5);
    }

    #[test]
    fn zero_years_omits_period_costs() {
        let result = car_cost(&CarCostInput {
            ownership_years: 0,
            ..input()
        });

        assert_eq!(result.running_costs, dec!(0));
        assert_eq!(result.total_cost, dec!(12000));
        assert_eq!(result.cost_per_year, None);
        assert_eq!(result.cost_per_month, None);
        assert_eq!(result.cost_per_mile, None);
    }

    #[test]
    fn resale_above_price_is_no_depreciation() {
        let result = car_cost(&CarCostInput {
            resale_value: dec!(25000),
            ..input()
        });

        assert_eq!(result.depreciation, dec!(0));
    }

    #[test]
    fn car_cost_overflow_degrades_to_zero() {
        let cost = car_cost(&CarCostInput {
            purchase_price: dec!(20000),
            ownership_years: 3,
            annual_fuel: Decimal::MAX,
            annual_insurance: dec!(600),
            ..CarCostInput::default()
        });

        assert_eq!(cost.total_cost, dec!(0));
        assert_eq!(cost.cost_per_year, None);
    }
}
