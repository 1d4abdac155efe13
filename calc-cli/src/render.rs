//! Report output in text, CSV and JSON.

use std::io::Write;

use anyhow::{Context, Result};
use calc_core::format::{format_value, plain_value};

use crate::cli::OutputFormat;
use crate::commands::{Report, Table};

pub fn render<W: Write>(
    report: &Report,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Text => render_text(report, out),
        OutputFormat::Csv => render_csv(report, out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report).context("Failed to write JSON")?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn render_text<W: Write>(
    report: &Report,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", report.title)?;
    writeln!(out, "{}", "=".repeat(report.title.chars().count()))?;

    let width = report
        .rows
        .iter()
        .map(|row| row.label.chars().count())
        .max()
        .unwrap_or(0);
    for row in &report.rows {
        writeln!(out, "{:<width$}  {:>14}", row.label, format_value(&row.value))?;
    }

    if let Some(table) = &report.table {
        writeln!(out)?;
        render_text_table(table, out)?;
    }
    Ok(())
}

fn render_text_table<W: Write>(
    table: &Table,
    out: &mut W,
) -> Result<()> {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:>width$}"))
            .collect::<Vec<_>>()
            .join("  ")
    };

    writeln!(out, "{}", line(table.headers.as_slice()))?;
    for row in &table.rows {
        writeln!(out, "{}", line(row.as_slice()))?;
    }
    Ok(())
}

fn render_csv<W: Write>(
    report: &Report,
    out: &mut W,
) -> Result<()> {
    {
        let mut writer = csv::Writer::from_writer(&mut *out);
        writer.write_record(["label", "value"])?;
        for row in &report.rows {
            writer.write_record([row.label.as_str(), plain_value(&row.value).as_str()])?;
        }
        writer.flush().context("Failed to write CSV")?;
    }

    if let Some(table) = &report.table {
        writeln!(out)?;
        let mut writer = csv::Writer::from_writer(&mut *out);
        writer.write_record(&table.headers)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer.flush().context("Failed to write CSV")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use calc_core::ResultRow;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn report() -> Report {
        Report {
            title: "Commission".to_string(),
            rows: vec![
                ResultRow::money("Sales revenue", dec!(10000)),
                ResultRow::percent("Commission rate", dec!(10)),
            ],
            result: serde_json::json!({ "commission_earned": "1000" }),
            table: None,
        }
    }

    fn rendered(
        report: &Report,
        format: OutputFormat,
    ) -> String {
        let mut out = Vec::new();
        render(report, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_aligns_labels() {
        assert_eq!(
            rendered(&report(), OutputFormat::Text),
            "Commission\n\
             ==========\n\
             Sales revenue        £10,000.00\n\
             Commission rate          10.00%\n"
        );
    }

    #[test]
    fn csv_has_label_value_rows() {
        assert_eq!(
            rendered(&report(), OutputFormat::Csv),
            "label,value\nSales revenue,10000.00\nCommission rate,10.00\n"
        );
    }

    #[test]
    fn csv_table_follows_after_blank_line() {
        let report = Report {
            table: Some(Table {
                headers: vec!["Month".to_string(), "Balance".to_string()],
                rows: vec![vec!["1".to_string(), "50.00".to_string()]],
            }),
            ..report()
        };

        let csv = rendered(&report, OutputFormat::Csv);

        assert!(csv.ends_with("\nMonth,Balance\n1,50.00\n"), "{csv}");
    }

    #[test]
    fn json_includes_rows_and_result() {
        let json: serde_json::Value =
            serde_json::from_str(&rendered(&report(), OutputFormat::Json)).unwrap();

        assert_eq!(json["title"], "Commission");
        assert_eq!(json["rows"][0]["value"]["kind"], "money");
        assert_eq!(json["result"]["commission_earned"], "1000");
        assert!(json.get("table").is_none());
    }
}
