use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use calc_data::BandTableLoader;
use clap::Parser;

/// Validate a band table CSV file and list the tables it defines.
///
/// The CSV file should have the following columns:
/// - table: The table name (e.g., uk-income-tax-2024-25)
/// - label: The band's display label
/// - upper_threshold: The top of the band (empty for unbounded)
/// - rate: The band's rate as a decimal (e.g., 0.20)
#[derive(Parser, Debug)]
#[command(name = "calc-table-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing band data
    #[arg(short, long)]
    file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open file: {}", args.file.display()))?;
    let tables = BandTableLoader::load(file)
        .with_context(|| format!("Failed to load tables from: {}", args.file.display()))?;

    for (name, table) in &tables {
        println!("{name}");
        for band in table.bands() {
            let upper = band
                .upper_threshold
                .map_or_else(|| "and above".to_string(), |t| format!("up to {t}"));
            println!("  {:<40} {:<16} {}", band.label, upper, band.rate);
        }
    }
    println!("{} table(s) OK.", tables.len());

    Ok(())
}
