use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single typed value in a calculation result.
///
/// The variant carries the unit so presentation code can format it without
/// knowing which calculator produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResultValue {
    /// Pounds sterling.
    Money(Decimal),
    /// A percentage expressed in percent, not as a fraction (`5.5` is 5.5%).
    Percent(Decimal),
    Years(Decimal),
    Weeks(Decimal),
    Count(u32),
    Flag(bool),
    Text(String),
}

/// A labelled value, the unit of display and CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub label: String,
    pub value: ResultValue,
}

impl ResultRow {
    pub fn new(
        label: impl Into<String>,
        value: ResultValue,
    ) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    pub fn money(
        label: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self::new(label, ResultValue::Money(amount))
    }

    pub fn percent(
        label: impl Into<String>,
        percent: Decimal,
    ) -> Self {
        Self::new(label, ResultValue::Percent(percent))
    }
}

/// Common output contract for every calculator result record.
///
/// `rows` lists the headline figures in display order. Statistics that could
/// not be computed because an optional input was missing are left out rather
/// than reported as zero.
pub trait CalculationResult {
    fn title(&self) -> &'static str;

    fn rows(&self) -> Vec<ResultRow>;
}
