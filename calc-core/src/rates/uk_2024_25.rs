//! UK thresholds and rates for the 2024/25 tax year (6 April 2024 – 5 April 2025).
//!
//! Income tax and National Insurance figures are for England, Wales and
//! Northern Ireland. Stamp duty figures are the SDLT rates in force until
//! 31 March 2025.

use std::sync::LazyLock;

use rust_decimal::Decimal;

use crate::{Band, BandTable};

/// Builds a table from `(label, upper threshold in pounds, rate in basis points)`.
///
/// Only used for the literal tables below, which are covered by tests.
fn table(rows: &[(&str, Option<i64>, i64)]) -> BandTable {
    let bands = rows
        .iter()
        .map(|&(label, upper, basis_points)| {
            Band::new(label, upper.map(Decimal::from), Decimal::new(basis_points, 4))
        })
        .collect();

    match BandTable::new(bands) {
        Ok(table) => table,
        Err(e) => panic!("built-in band table is invalid: {e}"),
    }
}

/// Income tax bands applied to income above the personal allowance.
pub static UK_INCOME_TAX_BANDS_2024_25: LazyLock<BandTable> = LazyLock::new(|| {
    table(&[
        ("Basic rate", Some(37_700), 2000),
        ("Higher rate", Some(125_140), 4000),
        ("Additional rate", None, 4500),
    ])
});

/// Dividend tax bands; they share income tax's thresholds.
pub static UK_DIVIDEND_TAX_BANDS_2024_25: LazyLock<BandTable> = LazyLock::new(|| {
    table(&[
        ("Dividend ordinary rate", Some(37_700), 875),
        ("Dividend upper rate", Some(125_140), 3375),
        ("Dividend additional rate", None, 3935),
    ])
});

/// Residential SDLT for buyers who are not first-time buyers.
pub static UK_STAMP_DUTY_STANDARD_BANDS_2024_25: LazyLock<BandTable> = LazyLock::new(|| {
    table(&[
        ("Up to £250,000", Some(250_000), 0),
        ("£250,001 to £925,000", Some(925_000), 500),
        ("£925,001 to £1.5m", Some(1_500_000), 1000),
        ("Above £1.5m", None, 1200),
    ])
});

/// First-time buyer relief bands. Only valid up to
/// [`FIRST_TIME_BUYER_PRICE_CAP`]; above it the standard bands apply.
pub static UK_STAMP_DUTY_FIRST_TIME_BUYER_BANDS_2024_25: LazyLock<BandTable> =
    LazyLock::new(|| {
        table(&[
            ("Up to £425,000", Some(425_000), 0),
            ("£425,001 to £625,000", None, 500),
        ])
    });

/// Class 1 primary (employee) contributions on annual earnings.
pub static UK_NI_CLASS_1_EMPLOYEE_BANDS_2024_25: LazyLock<BandTable> = LazyLock::new(|| {
    table(&[
        ("Below primary threshold", Some(12_570), 0),
        ("Main rate", Some(50_270), 800),
        ("Above upper earnings limit", None, 200),
    ])
});

/// Class 4 contributions on self-employed profits.
pub static UK_NI_CLASS_4_SELF_EMPLOYED_BANDS_2024_25: LazyLock<BandTable> = LazyLock::new(|| {
    table(&[
        ("Below lower profits limit", Some(12_570), 0),
        ("Main rate", Some(50_270), 600),
        ("Above upper profits limit", None, 200),
    ])
});

pub const PERSONAL_ALLOWANCE: Decimal = Decimal::from_parts(12_570, 0, 0, false, 0);
pub const PERSONAL_ALLOWANCE_TAPER_THRESHOLD: Decimal =
    Decimal::from_parts(100_000, 0, 0, false, 0);
pub const DIVIDEND_ALLOWANCE: Decimal = Decimal::from_parts(500, 0, 0, false, 0);
pub const FIRST_TIME_BUYER_PRICE_CAP: Decimal = Decimal::from_parts(625_000, 0, 0, false, 0);
/// Higher rates for additional dwellings: 3 percentage points on every band.
pub const ADDITIONAL_DWELLING_SURCHARGE: Decimal = Decimal::from_parts(3, 0, 0, false, 2);
pub const ADDITIONAL_DWELLING_MIN_PRICE: Decimal = Decimal::from_parts(40_000, 0, 0, false, 0);
