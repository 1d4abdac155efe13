use std::collections::BTreeMap;
use std::io::Read;

use calc_core::{Band, BandTable, BandTableError};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading band tables.
#[derive(Debug, Error)]
pub enum BandTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid table '{table}': {source}")]
    InvalidTable {
        table: String,
        #[source]
        source: BandTableError,
    },
}

impl From<csv::Error> for BandTableLoaderError {
    fn from(err: csv::Error) -> Self {
        BandTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a band table CSV file.
///
/// - `table`: name of the table the band belongs to
/// - `label`: display label for the band
/// - `upper_threshold`: top of the band (empty for unbounded)
/// - `rate`: the band's rate as a fraction (e.g., 0.20 for 20%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BandRecord {
    pub table: String,
    pub label: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_threshold: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for band tables from CSV files.
pub struct BandTableLoader;

impl BandTableLoader {
    /// Parse band records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BandRecord>, BandTableLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BandRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Group records into validated tables keyed by table name.
    ///
    /// Bands keep the order they appear in within each table.
    pub fn build(records: &[BandRecord]) -> Result<BTreeMap<String, BandTable>, BandTableLoaderError> {
        let mut groups: BTreeMap<String, Vec<Band>> = BTreeMap::new();

        for record in records {
            groups.entry(record.table.clone()).or_default().push(Band::new(
                record.label.clone(),
                record.upper_threshold,
                record.rate,
            ));
        }

        groups
            .into_iter()
            .map(|(table, bands)| {
                debug!(table = %table, bands = bands.len(), "building band table");
                match BandTable::new(bands) {
                    Ok(band_table) => Ok((table, band_table)),
                    Err(source) => Err(BandTableLoaderError::InvalidTable { table, source }),
                }
            })
            .collect()
    }

    /// Parse and build in one step.
    pub fn load<R: Read>(reader: R) -> Result<BTreeMap<String, BandTable>, BandTableLoaderError> {
        let records = Self::parse(reader)?;
        Self::build(&records)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = r#"table,label,upper_threshold,rate
income-tax,Basic rate,37700,0.20
income-tax,Higher rate,125140,0.40
income-tax,Additional rate,,0.45
ni-class-1,Below primary threshold,12570,0
ni-class-1,Main rate,50270,0.08
ni-class-1,Above upper earnings limit,,0.02
"#;

    #[test]
    fn test_parse_csv_single_band() {
        let csv = "table,label,upper_threshold,rate\nincome-tax,Basic rate,37700,0.20";

        let records = BandTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            BandRecord {
                table: "income-tax".to_string(),
                label: "Basic rate".to_string(),
                upper_threshold: Some(dec!(37700)),
                rate: dec!(0.20),
            }
        );
    }

    #[test]
    fn test_parse_csv_unbounded_threshold() {
        let csv = "table,label,upper_threshold,rate\nincome-tax,Additional rate,,0.45";

        let records = BandTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].upper_threshold, None);
        assert_eq!(records[0].rate, dec!(0.45));
    }

    #[test]
    fn test_parse_csv_trims_whitespace() {
        let csv = "table,label,upper_threshold,rate\nincome-tax , Basic rate , 37700 , 0.20";

        let records = BandTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].table, "income-tax");
        assert_eq!(records[0].label, "Basic rate");
        assert_eq!(records[0].upper_threshold, Some(dec!(37700)));
    }

    #[test]
    fn test_parse_full_csv() {
        let records = BandTableLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 6);
    }

    #[test]
    fn test_parse_invalid_rate() {
        let csv = "table,label,upper_threshold,rate\nincome-tax,Basic rate,37700,twenty";

        let result = BandTableLoader::parse(csv.as_bytes());

        assert!(matches!(result, Err(BandTableLoaderError::CsvParse(_))));
    }

    #[test]
    fn test_parse_missing_column() {
        let csv = "table,label,rate\nincome-tax,Basic rate,0.20";

        let result = BandTableLoader::parse(csv.as_bytes());

        assert!(matches!(result, Err(BandTableLoaderError::CsvParse(_))));
    }

    #[test]
    fn test_build_groups_by_table() {
        let records = BandTableLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        let tables = BandTableLoader::build(&records).expect("Failed to build tables");

        assert_eq!(tables.len(), 2);
        assert_eq!(tables["income-tax"].bands().len(), 3);
        assert_eq!(tables["ni-class-1"].bands()[1].rate, dec!(0.08));
        assert_eq!(tables["ni-class-1"].bands()[2].upper_threshold, None);
    }

    #[test]
    fn test_build_rejects_out_of_order_thresholds() {
        let csv = "table,label,upper_threshold,rate\n\
                   broken,Higher,125140,0.40\n\
                   broken,Basic,37700,0.20\n\
                   broken,Top,,0.45";
        let records = BandTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        let result = BandTableLoader::build(&records);

        match result {
            Err(BandTableLoaderError::InvalidTable { table, source }) => {
                assert_eq!(table, "broken");
                assert!(matches!(source, BandTableError::ThresholdNotIncreasing { .. }));
            }
            other => panic!("expected InvalidTable, got {other:?}"),
        }
    }

    #[test]
    fn test_build_rejects_bounded_top_band() {
        let csv = "table,label,upper_threshold,rate\nbroken,Only,1000,0.10";
        let records = BandTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        let result = BandTableLoader::build(&records);

        assert!(matches!(
            result,
            Err(BandTableLoaderError::InvalidTable {
                source: BandTableError::LastBandBounded(_),
                ..
            })
        ));
    }

    #[test]
    fn test_build_empty_input_is_empty_map() {
        let tables = BandTableLoader::build(&[]).expect("Failed to build tables");

        assert!(tables.is_empty());
    }
}
