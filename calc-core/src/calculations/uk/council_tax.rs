//! Council tax for a dwelling in England.
//!
//! Every band's charge is a fixed ratio of the council's band D charge,
//! expressed in ninths:
//!
//! | Band | A | B | C | D | E | F | G | H |
//! |------|---|---|---|---|---|---|---|---|
//! | Ninths | 6 | 7 | 8 | 9 | 11 | 13 | 15 | 18 |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{non_negative, or_zero, round_half_up};
use crate::{CalculationResult, ResultRow, ResultValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CouncilTaxBand {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl CouncilTaxBand {
    pub fn all() -> &'static [CouncilTaxBand] {
        &[
            Self::A,
            Self::B,
            Self::C,
            Self::D,
            Self::E,
            Self::F,
            Self::G,
            Self::H,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
            Self::H => "H",
        }
    }

    /// Parses a band letter, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|band| band.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// The band's charge in ninths of band D.
    pub fn ninths(&self) -> u32 {
        match self {
            Self::A => 6,
            Self::B => 7,
            Self::C => 8,
            Self::D => 9,
            Self::E => 11,
            Self::F => 13,
            Self::G => 15,
            Self::H => 18,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouncilTaxConfig {
    /// Fraction taken off when one adult lives in the dwelling.
    pub single_person_discount: Decimal,
}

impl Default for CouncilTaxConfig {
    fn default() -> Self {
        Self {
            single_person_discount: Decimal::new(25, 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouncilTax {
    pub band: CouncilTaxBand,
    pub band_charge: Decimal,
    pub discount: Decimal,
    pub annual: Decimal,
    /// Each payment when the bill is spread over ten months.
    pub ten_instalments: Decimal,
    /// Each payment when the bill is spread over twelve months.
    pub twelve_instalments: Decimal,
}

impl CalculationResult for CouncilTax {
    fn title(&self) -> &'static str {
        "Council tax"
    }

    fn rows(&self) -> Vec<ResultRow> {
        let mut rows = vec![
            ResultRow::new("Band", ResultValue::Text(self.band.as_str().to_string())),
            ResultRow::money("Band charge", self.band_charge),
        ];
        if self.discount > Decimal::ZERO {
            rows.push(ResultRow::money("Single person discount", self.discount));
        }
        rows.push(ResultRow::money("Annual bill", self.annual));
        rows.push(ResultRow::money("10 monthly instalments", self.ten_instalments));
        rows.push(ResultRow::money("12 monthly instalments", self.twelve_instalments));
        rows
    }
}

#[derive(Debug, Clone, Default)]
pub struct CouncilTaxCalculator {
    config: CouncilTaxConfig,
}

impl CouncilTaxCalculator {
    pub fn new(config: CouncilTaxConfig) -> Self {
        Self { config }
    }

    pub fn calculate(
        &self,
        band_d_charge: Decimal,
        band: CouncilTaxBand,
        single_person: bool,
    ) -> CouncilTax {
        let band_d_charge = non_negative(band_d_charge);
        let band_charge = band_d_charge
            .checked_mul(Decimal::from(band.ninths()))
            .map(|ninths| round_half_up(ninths / Decimal::from(9)));
        let band_charge = or_zero(band_charge, "council tax band charge");
        let discount = if single_person {
            let discount = band_charge.checked_mul(non_negative(self.config.single_person_discount));
            round_half_up(or_zero(discount, "single person discount"))
        } else {
            Decimal::ZERO
        };
        let annual = non_negative(band_charge - discount);

        debug!(%band_d_charge, band = band.as_str(), %annual, "calculated council tax");

        CouncilTax {
            band,
            band_charge,
            discount,
            annual,
            ten_instalments: round_half_up(annual / Decimal::TEN),
            twelve_instalments: round_half_up(annual / Decimal::from(12)),
        }
    }
}
