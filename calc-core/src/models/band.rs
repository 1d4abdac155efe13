use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One slice of a progressive schedule.
///
/// The band covers everything from the previous band's upper threshold (or
/// zero for the first band) up to `upper_threshold`. `None` means the band is
/// unbounded and must be the last one in its table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub label: String,
    pub upper_threshold: Option<Decimal>,
    pub rate: Decimal,
}

impl Band {
    pub fn new(
        label: impl Into<String>,
        upper_threshold: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        Self {
            label: label.into(),
            upper_threshold,
            rate,
        }
    }
}

/// Errors raised when a band table is structurally invalid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BandTableError {
    #[error("band table has no bands")]
    Empty,

    #[error("band '{label}' has a non-positive upper threshold {threshold}")]
    NonPositiveThreshold { label: String, threshold: Decimal },

    #[error("band '{label}' threshold {threshold} does not exceed the previous threshold {previous}")]
    ThresholdNotIncreasing {
        label: String,
        threshold: Decimal,
        previous: Decimal,
    },

    #[error("band '{0}' is unbounded but is not the last band")]
    UnboundedBandNotLast(String),

    #[error("the last band '{0}' must be unbounded")]
    LastBandBounded(String),

    #[error("band '{label}' rate must be between 0 and 1, got {rate}")]
    RateOutOfRange { label: String, rate: Decimal },
}

/// An ordered, validated list of [`Band`]s.
///
/// Thresholds are strictly increasing, only the final band is unbounded, and
/// every rate lies in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandTable {
    bands: Vec<Band>,
}

impl BandTable {
    /// Validates `bands` and wraps them in a table.
    ///
    /// # Errors
    ///
    /// Returns [`BandTableError`] if the list is empty, a threshold is not
    /// positive or not strictly greater than the one before it, an unbounded
    /// band appears before the end, the last band is bounded, or a rate is
    /// outside `[0, 1]`.
    pub fn new(bands: Vec<Band>) -> Result<Self, BandTableError> {
        let Some(last) = bands.last() else {
            return Err(BandTableError::Empty);
        };
        if last.upper_threshold.is_some() {
            return Err(BandTableError::LastBandBounded(last.label.clone()));
        }

        let mut previous = Decimal::ZERO;
        for (idx, band) in bands.iter().enumerate() {
            if band.rate < Decimal::ZERO || band.rate > Decimal::ONE {
                return Err(BandTableError::RateOutOfRange {
                    label: band.label.clone(),
                    rate: band.rate,
                });
            }

            match band.upper_threshold {
                None if idx + 1 < bands.len() => {
                    return Err(BandTableError::UnboundedBandNotLast(band.label.clone()));
                }
                None => {}
                Some(threshold) if threshold <= Decimal::ZERO => {
                    return Err(BandTableError::NonPositiveThreshold {
                        label: band.label.clone(),
                        threshold,
                    });
                }
                Some(threshold) if threshold <= previous => {
                    return Err(BandTableError::ThresholdNotIncreasing {
                        label: band.label.clone(),
                        threshold,
                        previous,
                    });
                }
                Some(threshold) => previous = threshold,
            }
        }

        Ok(Self { bands })
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Returns a copy of this table with `surcharge` added to every rate.
    ///
    /// Used for flat supplements such as the higher rates of stamp duty on
    /// additional dwellings.
    ///
    /// # Errors
    ///
    /// Returns [`BandTableError::RateOutOfRange`] if any surcharged rate
    /// leaves `[0, 1]`.
    pub fn with_surcharge(
        &self,
        surcharge: Decimal,
    ) -> Result<Self, BandTableError> {
        let bands = self
            .bands
            .iter()
            .map(|band| Band {
                label: band.label.clone(),
                upper_threshold: band.upper_threshold,
                rate: band.rate + surcharge,
            })
            .collect();

        Self::new(bands)
    }

    /// The marginal rate that applies to the next pound above `amount`.
    pub fn marginal_rate(
        &self,
        amount: Decimal,
    ) -> Decimal {
        self.bands
            .iter()
            .find(|band| band.upper_threshold.is_none_or(|upper| amount < upper))
            .map_or(Decimal::ZERO, |band| band.rate)
    }
}
