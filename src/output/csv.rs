//! CSV report writer.
//!
//! Rows are sorted by estimated cost (highest first) and followed by a
//! footer carrying the grand total:
//!
//! ```text
//! Function Name,Cold Start Count,Avg Init Duration (ms),Memory (MB),Monthly Init Cost (USD)
//! orders-api,412,731.22,1024,0.005021
//! ,,,Total Monthly INIT Cost (USD),0.005021
//! ```

use crate::commands::models::FunctionReport;
use crate::utils::config::{AVG_MS_DECIMAL_PLACES, COST_DECIMAL_PLACES};
use crate::utils::error::OutputError;
use log::{debug, info};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Report header, in column order
pub const HEADER: [&str; 5] = [
    "Function Name",
    "Cold Start Count",
    "Avg Init Duration (ms)",
    "Memory (MB)",
    "Monthly Init Cost (USD)",
];

/// Label placed in the memory column of the footer
pub const TOTAL_LABEL: &str = "Total Monthly INIT Cost (USD)";

/// One CSV record, already formatted
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    cold_start_count: u64,
    avg_init_ms: String,
    memory_mb: u32,
    monthly_cost_usd: String,
}

impl<'a> From<&'a FunctionReport> for CsvRow<'a> {
    fn from(report: &'a FunctionReport) -> Self {
        Self {
            name: &report.name,
            cold_start_count: report.cold_start_count,
            avg_init_ms: format_fixed(report.avg_init_ms, AVG_MS_DECIMAL_PLACES),
            memory_mb: report.memory_mb,
            monthly_cost_usd: format_fixed(report.monthly_cost_usd, COST_DECIMAL_PLACES),
        }
    }
}

/// Format with exactly `places` decimals, rounding half-up
pub fn format_fixed(value: Decimal, places: u32) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", places as usize, rounded)
}

/// Sort by cost, highest first; ties by name so output is stable
pub fn sort_reports(reports: &mut [FunctionReport]) {
    reports.sort_by(|a, b| {
        b.monthly_cost_usd
            .cmp(&a.monthly_cost_usd)
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Write the report (header, rows, total footer) to any writer
///
/// `reports` must already be sorted; see [`sort_reports`].
pub fn render_report<W: Write>(
    writer: W,
    reports: &[FunctionReport],
    grand_total: Decimal,
) -> Result<(), OutputError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(HEADER)?;

    for report in reports {
        csv_writer.serialize(CsvRow::from(report))?;
    }

    let total = format_fixed(grand_total, COST_DECIMAL_PLACES);
    csv_writer.write_record(["", "", "", TOTAL_LABEL, total.as_str()])?;

    csv_writer.flush()?;
    Ok(())
}

/// Sort `reports` and write them to a CSV file
///
/// **Public** - main entry point for CSV output
///
/// # Errors
/// * `OutputError::InvalidPath` - path is empty, a directory, or its parent can't be created
/// * `OutputError::WriteFailed` - I/O error while creating or writing the file
/// * `OutputError::Csv` - CSV encoding error
pub fn write_report(
    reports: &mut [FunctionReport],
    grand_total: Decimal,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing CSV output to: {}", output_path.display());

    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    sort_reports(reports);

    // Render next to the target and rename into place, so an interrupted
    // run never leaves a partial report behind
    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    render_report(BufWriter::new(staged.as_file_mut()), reports, grand_total)?;
    staged.persist(output_path).map_err(|e| OutputError::WriteFailed(e.error))?;

    debug!("Wrote {} row(s) to {}", reports.len(), output_path.display());

    Ok(())
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn report(name: &str, cost: &str) -> FunctionReport {
        FunctionReport {
            name: name.to_string(),
            cold_start_count: 3,
            avg_init_ms: Decimal::from_str("123.456").unwrap(),
            memory_mb: 256,
            monthly_cost_usd: Decimal::from_str(cost).unwrap(),
        }
    }

    fn render(reports: &[FunctionReport], total: &str) -> String {
        let mut buf = Vec::new();
        render_report(&mut buf, reports, Decimal::from_str(total).unwrap()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_format_fixed_pads_and_rounds() {
        assert_eq!(format_fixed(Decimal::from(250), 2), "250.00");
        assert_eq!(format_fixed(Decimal::from_str("0.125").unwrap(), 2), "0.13");
        assert_eq!(format_fixed(Decimal::ZERO, 6), "0.000000");
    }

    #[test]
    fn test_sort_is_numeric_not_lexical() {
        // Lexically "9.5" > "10.0"
        let mut reports = vec![report("a", "9.5"), report("b", "10.0"), report("c", "0.000001")];
        sort_reports(&mut reports);

        let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_render_row_format() {
        let out = render(&[report("orders", "0.00042")], "0.00042");
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "orders,3,123.46,256,0.000420");
        assert_eq!(lines[2], ",,,Total Monthly INIT Cost (USD),0.000420");
    }

    #[test]
    fn test_render_empty_report() {
        let out = render(&[], "0");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![HEADER.join(","), format!(",,,{},0.000000", TOTAL_LABEL)]
        );
    }

    #[test]
    fn test_validate_output_path_empty() {
        assert!(validate_output_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_output_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.csv");

        write_report(&mut [report("a", "1")], Decimal::ONE, &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_write_replaces_existing_report_without_leftovers() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("report.csv");
        std::fs::write(&path, "stale contents that are longer than nothing\n").unwrap();

        write_report(&mut [report("a", "1")], Decimal::ONE, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Function Name,"));
        assert!(!contents.contains("stale"));

        let entries: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("report.csv")]);
    }
}
