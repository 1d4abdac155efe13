//! Buy-to-let rental yield and cashflow.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::{non_negative, round_half_up};
use crate::calculations::ratios::{cash_on_cash_return, gross_yield, net_yield};
use crate::{CalculationResult, ResultRow};

/// Inputs for [`rental_yield`]. Missing figures are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalInput {
    pub property_value: Decimal,
    pub monthly_rent: Decimal,
    /// Letting fees, insurance, maintenance and other yearly costs.
    pub annual_costs: Decimal,
    pub monthly_mortgage: Decimal,
    /// Deposit and purchase costs actually paid in cash.
    pub cash_invested: Decimal,
}

/// Result of [`rental_yield`].
///
/// Yields are `None` without a property value and the cash-on-cash return is
/// `None` without cash invested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalYield {
    pub annual_rent: Decimal,
    pub gross_yield: Option<Decimal>,
    pub net_yield: Option<Decimal>,
    pub annual_cashflow: Decimal,
    pub monthly_cashflow: Decimal,
    pub cash_on_cash_return: Option<Decimal>,
}

impl CalculationResult for RentalYield {
    fn title(&self) -> &'static str {
        "Rental yield"
    }

    fn rows(&self) -> Vec<ResultRow> {
        let mut rows = vec![ResultRow::money("Annual rent", self.annual_rent)];
        if let Some(gross) = self.gross_yield {
            rows.push(ResultRow::percent("Gross yield", gross));
        }
        if let Some(net) = self.net_yield {
            rows.push(ResultRow::percent("Net yield", net));
        }
        rows.push(ResultRow::money("Annual cashflow", self.annual_cashflow));
        rows.push(ResultRow::money("Monthly cashflow", self.monthly_cashflow));
        if let Some(coc) = self.cash_on_cash_return {
            rows.push(ResultRow::percent("Cash-on-cash return", coc));
        }
        rows
    }
}

/// Yields and cashflow for a let property.
///
/// Figures too large to represent give a zeroed result.
pub fn rental_yield(input: &RentalInput) -> RentalYield {
    let property_value = non_negative(input.property_value);
    let cash_invested = non_negative(input.cash_invested);
    let annual_costs = non_negative(input.annual_costs);
    let annual = |monthly: Decimal| non_negative(monthly).checked_mul(Decimal::from(12));

    let figures = annual(input.monthly_rent).and_then(|rent| {
        let outgoings = annual_costs.checked_add(annual(input.monthly_mortgage)?)?;
        Some((rent, rent.checked_sub(outgoings)?))
    });
    let Some((annual_rent, annual_cashflow)) = figures else {
        warn!(%property_value, "rental figures overflowed");
        return RentalYield {
            annual_rent: Decimal::ZERO,
            gross_yield: None,
            net_yield: None,
            annual_cashflow: Decimal::ZERO,
            monthly_cashflow: Decimal::ZERO,
            cash_on_cash_return: None,
        };
    };
    let annual_cashflow = round_half_up(annual_cashflow);
    let has_value = property_value > Decimal::ZERO;

    debug!(%property_value, %annual_rent, %annual_cashflow, "calculated rental yield");

    RentalYield {
        annual_rent,
        gross_yield: has_value.then(|| gross_yield(annual_rent, property_value)),
        net_yield: has_value.then(|| net_yield(annual_rent, annual_costs, property_value)),
        annual_cashflow,
        monthly_cashflow: round_half_up(annual_cashflow / Decimal::from(12)),
        cash_on_cash_return: (cash_invested > Decimal::ZERO)
            .then(|| cash_on_cash_return(annual_cashflow, cash_invested)),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn input() -> RentalInput {
        RentalInput {
            property_value: dec!(200000),
            monthly_rent: dec!(1000),
            annual_costs: dec!(3000),
            monthly_mortgage: dec!(500),
            cash_invested: dec!(50000),
        }
    }

    #[test]
    fn full_inputs_give_every_statistic() {
        let result = rental_yield(&input());

        assert_eq!(result.annual_rent, dec!(12000));
        assert_eq!(result.gross_yield, Some(dec!(6.00)));
        assert_eq!(result.net_yield, Some(dec!(4.50)));
        assert_eq!(result.annual_cashflow, dec!(3000));
        assert_eq!(result.monthly_cashflow, dec!(250));
        assert_eq!(result.cash_on_cash_return, Some(dec!(6.00)));
        assert_eq!(result.rows().len(), 6);
    }

    #[test]
    fn missing_property_value_omits_yields() {
        let result = rental_yield(&RentalInput {
            property_value: dec!(0),
            ..input()
        });

        assert_eq!(result.gross_yield, None);
        assert_eq!(result.net_yield, None);
        assert_eq!(result.rows().len(), 4);
    }

    #[test]
    fn missing_cash_invested_omits_cash_on_cash() {
        let result = rental_yield(&RentalInput {
            cash_invested: dec!(0),
            ..input()
        });

        assert_eq!(result.cash_on_cash_return, None);
    }

    #[test]
    fn costs_above_rent_give_negative_cashflow() {
        let result = rental_yield(&RentalInput {
            monthly_mortgage: dec!(900),
            ..input()
        });

        assert_eq!(result.annual_cashflow, dec!(-1800));
        assert_eq!(result.monthly_cashflow, dec!(-150));
        assert_eq!(result.cash_on_cash_return, Some(dec!(-3.60)));
    }

    #[test]
    fn rental_yield_overflow_degrades_to_zero() {
        let result = rental_yield(&RentalInput {
            property_value: dec!(250000),
            monthly_rent: Decimal::MAX,
            ..RentalInput::default()
        });

        assert_eq!(result.annual_rent, dec!(0));
        assert_eq!(result.gross_yield, None);
        assert_eq!(result.monthly_cashflow, dec!(0));
    }
}
