//! Stamp Duty Land Tax on residential purchases in England and Northern Ireland.
//!
//! | Buyer | Bands used |
//! |-------|------------|
//! | Standard | standard bands |
//! | First-time buyer, price ≤ £625,000 | relief bands (0% to £425,000, then 5%) |
//! | First-time buyer, price > £625,000 | standard bands; relief is lost entirely |
//! | Additional property, price ≥ £40,000 | standard bands plus 3% on every band |
//!
//! The breakdown lists every band the price reaches, including the 0% slice.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::bands::{BandBreakdown, BandEvaluator};
use crate::calculations::common::non_negative;
use crate::calculations::ratios::effective_rate;
use crate::rates::{
    ADDITIONAL_DWELLING_MIN_PRICE, ADDITIONAL_DWELLING_SURCHARGE, FIRST_TIME_BUYER_PRICE_CAP,
    UK_STAMP_DUTY_FIRST_TIME_BUYER_BANDS_2024_25, UK_STAMP_DUTY_STANDARD_BANDS_2024_25,
};
use crate::{BandTable, BandTableError, CalculationResult, ResultRow, ResultValue};

/// Who is buying, which decides the bands that apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuyerType {
    Standard,
    FirstTimeBuyer,
    AdditionalProperty,
}

impl BuyerType {
    pub fn all() -> &'static [BuyerType] {
        &[
            BuyerType::Standard,
            BuyerType::FirstTimeBuyer,
            BuyerType::AdditionalProperty,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::FirstTimeBuyer => "first-time-buyer",
            Self::AdditionalProperty => "additional-property",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "standard" => Some(Self::Standard),
            "first-time-buyer" | "ftb" => Some(Self::FirstTimeBuyer),
            "additional-property" | "additional" => Some(Self::AdditionalProperty),
            _ => None,
        }
    }
}

/// Rates and thresholds for [`StampDutyCalculator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StampDutyConfig {
    pub standard_bands: BandTable,
    pub first_time_buyer_bands: BandTable,
    /// Highest price at which first-time buyer relief is available.
    pub first_time_buyer_price_cap: Decimal,
    /// Added to every band rate for additional dwellings.
    pub additional_dwelling_surcharge: Decimal,
    /// Purchases below this price never pay the surcharge.
    pub additional_dwelling_min_price: Decimal,
}

impl Default for StampDutyConfig {
    fn default() -> Self {
        Self {
            standard_bands: UK_STAMP_DUTY_STANDARD_BANDS_2024_25.clone(),
            first_time_buyer_bands: UK_STAMP_DUTY_FIRST_TIME_BUYER_BANDS_2024_25.clone(),
            first_time_buyer_price_cap: FIRST_TIME_BUYER_PRICE_CAP,
            additional_dwelling_surcharge: ADDITIONAL_DWELLING_SURCHARGE,
            additional_dwelling_min_price: ADDITIONAL_DWELLING_MIN_PRICE,
        }
    }
}

/// Result of [`StampDutyCalculator::calculate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StampDuty {
    pub price: Decimal,
    pub buyer: BuyerType,
    pub first_time_buyer_relief: bool,
    pub surcharge_applied: bool,
    pub tax: Decimal,
    pub effective_rate_percent: Decimal,
    pub breakdown: Vec<BandBreakdown>,
}

impl CalculationResult for StampDuty {
    fn title(&self) -> &'static str {
        "Stamp Duty Land Tax"
    }

    fn rows(&self) -> Vec<ResultRow> {
        let mut rows = vec![ResultRow::money("Property price", self.price)];
        if self.buyer == BuyerType::FirstTimeBuyer {
            rows.push(ResultRow::new(
                "First-time buyer relief",
                ResultValue::Flag(self.first_time_buyer_relief),
            ));
        }
        if self.surcharge_applied {
            rows.push(ResultRow::new(
                "Higher rates for additional dwellings",
                ResultValue::Flag(true),
            ));
        }
        rows.extend(self.breakdown.iter().map(BandBreakdown::to_row));
        rows.push(ResultRow::money("Stamp duty", self.tax));
        rows.push(ResultRow::percent("Effective rate", self.effective_rate_percent));
        rows
    }
}

/// Calculates SDLT on a purchase price.
#[derive(Debug, Clone)]
pub struct StampDutyCalculator {
    config: StampDutyConfig,
    additional_dwelling_bands: BandTable,
}

impl StampDutyCalculator {
    /// Builds the calculator, deriving the additional-dwelling bands from the
    /// standard bands.
    ///
    /// # Errors
    ///
    /// Returns [`BandTableError::RateOutOfRange`] if the surcharge pushes any
    /// band rate outside `[0, 1]`.
    pub fn new(config: StampDutyConfig) -> Result<Self, BandTableError> {
        let additional_dwelling_bands = config
            .standard_bands
            .with_surcharge(config.additional_dwelling_surcharge)?;

        Ok(Self {
            config,
            additional_dwelling_bands,
        })
    }

    pub fn calculate(
        &self,
        price: Decimal,
        buyer: BuyerType,
    ) -> StampDuty {
        let price = non_negative(price);

        let first_time_buyer_relief =
            buyer == BuyerType::FirstTimeBuyer && price <= self.config.first_time_buyer_price_cap;
        let surcharge_applied = buyer == BuyerType::AdditionalProperty
            && price >= self.config.additional_dwelling_min_price;

        let bands = if first_time_buyer_relief {
            &self.config.first_time_buyer_bands
        } else if surcharge_applied {
            &self.additional_dwelling_bands
        } else {
            &self.config.standard_bands
        };

        let evaluation = BandEvaluator::new(bands)
            .include_zero_rate_bands(true)
            .evaluate(price);

        debug!(%price, buyer = buyer.as_str(), tax = %evaluation.total, "calculated stamp duty");

        StampDuty {
            price,
            buyer,
            first_time_buyer_relief,
            surcharge_applied,
            tax: evaluation.total,
            effective_rate_percent: effective_rate(evaluation.total, price),
            breakdown: evaluation.breakdown,
        }
    }
}
