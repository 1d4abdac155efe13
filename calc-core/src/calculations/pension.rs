//! Defined-contribution pension projection.
//!
//! Personal contributions are paid net of basic-rate tax and the provider
//! claims the relief, so a net payment is grossed up by dividing by
//! `1 - basic_rate` (£80 becomes £100). Employer contributions are added
//! gross. The pot grows via [`future_value`], and up to a quarter of it can be
//! taken tax free, subject to the lump sum allowance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{non_negative, or_zero, round_half_up};
use crate::calculations::growth::future_value;
use crate::{CalculationResult, ResultRow};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionConfig {
    /// Rate at which relief at source is added to personal contributions.
    pub basic_rate_relief: Decimal,
    /// Fraction of the pot that may be taken tax free.
    pub tax_free_fraction: Decimal,
    /// Lump sum allowance.
    pub tax_free_cap: Decimal,
}

impl Default for PensionConfig {
    fn default() -> Self {
        Self {
            basic_rate_relief: Decimal::new(20, 2),
            tax_free_fraction: Decimal::new(25, 2),
            tax_free_cap: Decimal::from(268_275),
        }
    }
}

/// Inputs for [`PensionProjector::project`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionInput {
    pub current_pot: Decimal,
    /// What the member pays each month, before relief is added.
    pub personal_monthly_net: Decimal,
    pub employer_monthly: Decimal,
    pub annual_growth_percent: Decimal,
    pub years: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionProjection {
    pub personal_monthly_gross: Decimal,
    pub monthly_tax_relief: Decimal,
    pub total_monthly_contribution: Decimal,
    pub starting_pot: Decimal,
    pub projected_pot: Decimal,
    /// Contributions paid in over the term, excluding the starting pot.
    pub total_contributed: Decimal,
    pub total_tax_relief: Decimal,
    pub investment_growth: Decimal,
    pub tax_free_lump_sum: Decimal,
    pub remaining_pot: Decimal,
}

impl CalculationResult for PensionProjection {
    fn title(&self) -> &'static str {
        "Pension projection"
    }

    fn rows(&self) -> Vec<ResultRow> {
        vec![
            ResultRow::money("Personal contribution (gross)", self.personal_monthly_gross),
            ResultRow::money("Tax relief per month", self.monthly_tax_relief),
            ResultRow::money("Total monthly contribution", self.total_monthly_contribution),
            ResultRow::money("Starting pot", self.starting_pot),
            ResultRow::money("Projected pot", self.projected_pot),
            ResultRow::money("Total contributed", self.total_contributed),
            ResultRow::money("Total tax relief", self.total_tax_relief),
            ResultRow::money("Investment growth", self.investment_growth),
            ResultRow::money("Tax-free lump sum", self.tax_free_lump_sum),
            ResultRow::money("Remaining pot", self.remaining_pot),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct PensionProjector {
    config: PensionConfig,
}

impl PensionProjector {
    pub fn new(config: PensionConfig) -> Self {
        Self { config }
    }

    /// Grosses up a net personal contribution for relief at source.
    pub fn gross_up(
        &self,
        net: Decimal,
    ) -> Decimal {
        let retained = Decimal::ONE - non_negative(self.config.basic_rate_relief);
        if retained <= Decimal::ZERO {
            return non_negative(net);
        }
        round_half_up(or_zero(non_negative(net).checked_div(retained), "gross contribution"))
    }

    pub fn project(
        &self,
        input: &PensionInput,
    ) -> PensionProjection {
        let starting_pot = round_half_up(non_negative(input.current_pot));
        let personal_monthly_net = non_negative(input.personal_monthly_net);
        let personal_monthly_gross = self.gross_up(personal_monthly_net);
        let monthly_tax_relief = non_negative(personal_monthly_gross - personal_monthly_net);
        let total_monthly_contribution = or_zero(
            personal_monthly_gross.checked_add(non_negative(input.employer_monthly)),
            "monthly contribution",
        );

        let growth = future_value(
            starting_pot,
            total_monthly_contribution,
            input.annual_growth_percent,
            input.years,
        );
        let months = Decimal::from(growth.yearly_series.len().saturating_sub(1)) * Decimal::from(12);

        let tax_free_share = growth
            .future_value
            .checked_mul(non_negative(self.config.tax_free_fraction));
        let tax_free_lump_sum = round_half_up(or_zero(tax_free_share, "tax-free lump sum"))
            .min(self.config.tax_free_cap)
            .min(growth.future_value);

        debug!(pot = %growth.future_value, %tax_free_lump_sum, "projected pension");

        PensionProjection {
            personal_monthly_gross,
            monthly_tax_relief,
            total_monthly_contribution,
            starting_pot,
            projected_pot: growth.future_value,
            total_contributed: non_negative(growth.total_principal - starting_pot),
            total_tax_relief: or_zero(monthly_tax_relief.checked_mul(months), "total tax relief"),
            investment_growth: growth.total_interest,
            tax_free_lump_sum,
            remaining_pot: growth.future_value - tax_free_lump_sum,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn net_contribution_is_grossed_up_by_a_quarter() {
        assert_eq!(PensionProjector::default().gross_up(dec!(80)), dec!(100));
        assert_eq!(PensionProjector::default().gross_up(dec!(200)), dec!(250));
    }

    #[test]
    fn flat_projection_without_growth() {
        let result = PensionProjector::default().project(&PensionInput {
            current_pot: dec!(0),
            personal_monthly_net: dec!(200),
            employer_monthly: dec!(100),
            annual_growth_percent: dec!(0),
            years: 10,
        });

        assert_eq!(result.personal_monthly_gross, dec!(250));
        assert_eq!(result.monthly_tax_relief, dec!(50));
        assert_eq!(result.total_monthly_contribution, dec!(350));
        assert_eq!(result.projected_pot, dec!(42000));
        assert_eq!(result.total_tax_relief, dec!(6000));
        assert_eq!(result.investment_growth, dec!(0));
        assert_eq!(result.tax_free_lump_sum, dec!(10500));
        assert_eq!(result.remaining_pot, dec!(31500));
    }

    #[test]
    fn growth_is_reported_separately_from_contributions() {
        let result = PensionProjector::default().project(&PensionInput {
            current_pot: dec!(10000),
            personal_monthly_net: dec!(0),
            employer_monthly: dec!(0),
            annual_growth_percent: dec!(12),
            years: 1,
        });

        assert_eq!(result.projected_pot, dec!(11268.25));
        assert_eq!(result.investment_growth, dec!(1268.25));
        assert_eq!(result.total_contributed, dec!(0));
    }

    #[test]
    fn lump_sum_is_capped() {
        let result = PensionProjector::default().project(&PensionInput {
            current_pot: dec!(2000000),
            ..PensionInput::default()
        });

        assert_eq!(result.tax_free_lump_sum, dec!(268275));
        assert_eq!(result.remaining_pot, dec!(1731725));
    }

    #[test]
    fn starting_pot_is_not_counted_as_contributions() {
        let result = PensionProjector::default().project(&PensionInput {
            current_pot: dec!(5000),
            personal_monthly_net: dec!(80),
            employer_monthly: dec!(0),
            annual_growth_percent: dec!(0),
            years: 1,
        });

        assert_eq!(result.starting_pot, dec!(5000));
        assert_eq!(result.total_contributed, dec!(1200));
        assert_eq!(result.projected_pot, dec!(6200));
    }
}
