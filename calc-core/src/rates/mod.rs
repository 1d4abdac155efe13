//! Versioned rate and threshold tables.
//!
//! Each tax year lives in its own module so a new year is one new file. The
//! registry below exposes the band tables by a stable name for callers that
//! select a table at runtime.

mod uk_2024_25;

pub use uk_2024_25::*;

use crate::BandTable;

/// Names of every built-in band table, in the order they are listed to users.
pub const BUILTIN_TABLES: &[&str] = &[
    "uk-income-tax-2024-25",
    "uk-dividend-tax-2024-25",
    "uk-stamp-duty-standard-2024-25",
    "uk-stamp-duty-first-time-buyer-2024-25",
    "uk-ni-class-1-2024-25",
    "uk-ni-class-4-2024-25",
];

/// Looks up a built-in band table by name.
pub fn builtin_table(name: &str) -> Option<&'static BandTable> {
    let table: &'static BandTable = match name {
        "uk-income-tax-2024-25" => &UK_INCOME_TAX_BANDS_2024_25,
        "uk-dividend-tax-2024-25" => &UK_DIVIDEND_TAX_BANDS_2024_25,
        "uk-stamp-duty-standard-2024-25" => &UK_STAMP_DUTY_STANDARD_BANDS_2024_25,
        "uk-stamp-duty-first-time-buyer-2024-25" => &UK_STAMP_DUTY_FIRST_TIME_BUYER_BANDS_2024_25,
        "uk-ni-class-1-2024-25" => &UK_NI_CLASS_1_EMPLOYEE_BANDS_2024_25,
        "uk-ni-class-4-2024-25" => &UK_NI_CLASS_4_SELF_EMPLOYED_BANDS_2024_25,
        _ => return None,
    };
    Some(table)
}
