//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod scan;

// Re-export main command functions
pub use models::{FunctionOutcome, FunctionReport, ScanArgs, ScanWindow, SkipReason};
pub use scan::{execute_scan, process_function, run_scan, validate_args, ScanOutput};
