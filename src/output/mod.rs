//! Output writers for the cost report.

pub mod csv;

// Re-export main functions
pub use self::csv::{format_fixed, render_report, sort_reports, write_report, HEADER, TOTAL_LABEL};
