//! Integration tests for loading band tables from the bundled CSV fixture.

use calc_core::calculations::BandEvaluator;
use calc_core::rates::{BUILTIN_TABLES, builtin_table};
use calc_data::{BandTableLoader, BandTableLoaderError};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

const UK_BANDS_2024_25: &str = include_str!("../test-data/uk_bands_2024_25.csv");

#[test]
fn test_fixture_loads_every_builtin_table() {
    let tables = BandTableLoader::load(UK_BANDS_2024_25.as_bytes()).expect("Failed to load tables");

    assert_eq!(tables.len(), BUILTIN_TABLES.len());
    for name in BUILTIN_TABLES {
        assert!(tables.contains_key(*name), "fixture is missing {name}");
    }
}

#[test]
fn test_fixture_matches_builtin_tables() {
    let tables = BandTableLoader::load(UK_BANDS_2024_25.as_bytes()).expect("Failed to load tables");

    for (name, table) in &tables {
        let builtin = builtin_table(name).expect("fixture table is not built in");
        assert_eq!(table, builtin, "table {name} differs from the built-in copy");
    }
}

#[test]
fn test_loaded_table_evaluates_like_builtin() {
    let tables = BandTableLoader::load(UK_BANDS_2024_25.as_bytes()).expect("Failed to load tables");
    let income_tax = &tables["uk-income-tax-2024-25"];

    let evaluation = BandEvaluator::new(income_tax).evaluate(dec!(80000));

    assert_eq!(evaluation.total, dec!(24460.00));
}

#[test]
fn test_invalid_table_names_the_table() {
    let csv = format!("{UK_BANDS_2024_25}custom,Flat,,1.50\n");

    let err = BandTableLoader::load(csv.as_bytes()).unwrap_err();

    assert!(matches!(err, BandTableLoaderError::InvalidTable { ref table, .. } if table == "custom"));
    assert!(err.to_string().contains("custom"));
}
