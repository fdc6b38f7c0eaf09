use crate::aggregator::Pricing;
use crate::utils::config::{
    DEFAULT_DAYS_BACK, DEFAULT_MAX_EVENTS_PER_GROUP, DEFAULT_OUTFILE, LAMBDA_LOG_GROUP_PREFIX,
};
use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::path::PathBuf;

/// Arguments for the scan command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ScanArgs {
    /// Explicit region (falls back to $AWS_REGION, then the AWS profile)
    pub region: Option<String>,

    /// Look-back window in days
    pub days: u32,

    /// Destination CSV file
    pub outfile: PathBuf,

    /// Pricing applied to every function
    pub pricing: Pricing,

    /// Cap on events fetched per log group
    pub max_events_per_group: usize,

    /// Log group prefix identifying Lambda functions
    pub log_group_prefix: String,

    /// Print the costliest functions to stdout
    pub print_summary: bool,
}

impl Default for ScanArgs {
    fn default() -> Self {
        Self {
            region: None,
            days: DEFAULT_DAYS_BACK,
            outfile: PathBuf::from(DEFAULT_OUTFILE),
            pricing: Pricing::default(),
            max_events_per_group: DEFAULT_MAX_EVENTS_PER_GROUP,
            log_group_prefix: LAMBDA_LOG_GROUP_PREFIX.to_string(),
            print_summary: false,
        }
    }
}

/// One row of the report. Never mutated once built.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionReport {
    pub name: String,
    /// Always > 0; functions without cold starts get no row
    pub cold_start_count: u64,
    pub avg_init_ms: Decimal,
    pub memory_mb: u32,
    /// Rounded to six decimal places
    pub monthly_cost_usd: Decimal,
}

/// Why a function produced no report row
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// GetFunctionConfiguration failed; holds the error code
    LookupFailed(String),
    NotZipPackage(String),
    CustomRuntime(String),
    /// FilterLogEvents failed; holds the error code
    QueryFailed(String),
    NoColdStarts,
    /// Events were found but none carried a readable duration
    NoParsableDurations { malformed: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::LookupFailed(code) => write!(f, "{}", code),
            SkipReason::NotZipPackage(kind) if kind.is_empty() => write!(f, "not ZIP package"),
            SkipReason::NotZipPackage(kind) => write!(f, "not ZIP package ({})", kind),
            SkipReason::CustomRuntime(runtime) => write!(f, "custom runtime ({})", runtime),
            SkipReason::QueryFailed(code) => write!(f, "log query failed ({})", code),
            SkipReason::NoColdStarts => write!(f, "0 cold starts"),
            SkipReason::NoParsableDurations { malformed } => {
                write!(f, "none of {} init line(s) could be parsed", malformed)
            }
        }
    }
}

/// Result of processing a single function
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionOutcome {
    Reported(FunctionReport),
    Skipped { function: String, reason: SkipReason },
}

/// Start and end of the scan window, milliseconds since the epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl ScanWindow {
    /// The `days` days ending at `now`
    pub fn last_days(days: u32, now: DateTime<Utc>) -> Self {
        let start = now - TimeDelta::days(i64::from(days));
        Self {
            start_ms: start.timestamp_millis(),
            end_ms: now.timestamp_millis(),
        }
    }
}
