//! Scan command implementation.
//!
//! The scan command:
//! 1. Resolves the region
//! 2. Lists Lambda log groups
//! 3. Filters out image and custom-runtime functions
//! 4. Pulls "Init Duration" REPORT lines for the look-back window
//! 5. Estimates the init cost of each function
//! 6. Writes the sorted CSV report
//!
//! Functions are processed one at a time. Anything that goes wrong for a
//! single function turns into a logged skip; only listing the log groups
//! and writing the report can fail the run.

use super::models::{FunctionOutcome, FunctionReport, ScanArgs, ScanWindow, SkipReason};
use crate::aggregator::{check_function, estimate_function, RunTotals};
use crate::aws::{
    build_runtime, event_messages, log_group_names, profile_region, AwsClients, EventQuery,
    FunctionsApi, LogsApi,
};
use crate::output::{format_fixed, write_report};
use crate::parser::parse_init_durations;
use crate::utils::config::{
    AVG_MS_DECIMAL_PLACES, COST_DECIMAL_PLACES, EVENTS_PAGE_SIZE, INIT_FILTER_PATTERN,
    INTERRUPT_EXIT_CODE, LAMBDA_LOG_GROUP_PREFIX, MAX_DAYS_BACK, REGION_ENV_VAR, SUMMARY_TOP_N,
};
use crate::utils::error::{AwsError, ConfigError};
use crate::utils::region::resolve_region;
use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::time::Instant;
use tokio::runtime::Handle;

/// Everything a finished scan produced
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    /// Report rows in processing order (sorted when written)
    pub reports: Vec<FunctionReport>,
    pub totals: RunTotals,
}

/// Execute the scan command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Invalid arguments or no resolvable region (before any AWS call)
/// * Log group listing failures
/// * Report write failures
pub fn execute_scan(args: ScanArgs) -> Result<ScanOutput> {
    let start_time = Instant::now();

    validate_args(&args)?;

    let runtime = build_runtime().context("Failed to start AWS SDK runtime")?;

    let env_region = std::env::var(REGION_ENV_VAR).ok();
    let region = resolve_region(args.region.as_deref(), env_region.as_deref(), || {
        profile_region(&runtime)
    })?;

    debug!("Region {} resolved from {:?}", region.name, region.source);
    info!(
        "Scanning region {} for the past {} day(s). Output -> {}",
        region.name,
        args.days,
        args.outfile.display()
    );

    let clients = AwsClients::connect(runtime, &region.name);
    watch_for_interrupt(&clients.handle());

    let window = ScanWindow::last_days(args.days, Utc::now());
    let mut output = run_scan(&clients, &clients, &args, window)?;

    write_report(&mut output.reports, output.totals.total(), &args.outfile)
        .with_context(|| format!("Failed to write report to {}", args.outfile.display()))?;

    info!(
        "Report saved to {}. Total cost USD {}",
        args.outfile.display(),
        format_fixed(output.totals.total(), COST_DECIMAL_PLACES)
    );
    info!(
        "{} function(s) analyzed in {}: {} reported, {} skipped",
        output.totals.functions_analyzed,
        clients.region(),
        output.totals.functions_reported,
        output.totals.functions_skipped
    );

    if args.print_summary {
        println!("{}", render_summary(&output.reports, &output.totals));
    }

    info!("Scan completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(output)
}

/// Walk every Lambda log group and estimate each function's init cost
///
/// **Public** - the AWS-independent core of the scan
///
/// # Errors
/// Only a failure to list log groups is fatal; per-function failures
/// become skips.
pub fn run_scan<L, F>(
    logs: &L,
    functions: &F,
    args: &ScanArgs,
    window: ScanWindow,
) -> Result<ScanOutput>
where
    L: LogsApi + ?Sized,
    F: FunctionsApi + ?Sized,
{
    let mut output = ScanOutput::default();

    info!("Listing CloudWatch log groups...");

    for log_group in log_group_names(logs, &args.log_group_prefix) {
        let log_group = log_group.context("Failed to list CloudWatch log groups")?;
        let function_name = function_name_from_log_group(&log_group);

        info!("Analyzing {}", function_name);

        match process_function(logs, functions, &log_group, function_name, args, window) {
            FunctionOutcome::Reported(report) => {
                output.totals.record_report(&report);
                output.reports.push(report);
            }
            FunctionOutcome::Skipped { function, reason } => {
                match reason {
                    SkipReason::LookupFailed(_) | SkipReason::QueryFailed(_) => {
                        warn!("Skipping {}: {}", function, reason)
                    }
                    _ => info!("Skipping {}: {}", function, reason),
                }
                output.totals.record_skip();
            }
        }
    }

    Ok(output)
}

/// Run one function through lookup, filtering, extraction and costing
///
/// **Public** - each skip condition can be exercised on its own
pub fn process_function<L, F>(
    logs: &L,
    functions: &F,
    log_group: &str,
    function_name: &str,
    args: &ScanArgs,
    window: ScanWindow,
) -> FunctionOutcome
where
    L: LogsApi + ?Sized,
    F: FunctionsApi + ?Sized,
{
    let skip = |reason: SkipReason| FunctionOutcome::Skipped {
        function: function_name.to_string(),
        reason,
    };

    let config = match functions.get_function_configuration(function_name) {
        Ok(config) => config,
        Err(e) => {
            debug!("{}: {}", function_name, e);
            return skip(SkipReason::LookupFailed(e.code().to_string()));
        }
    };

    let memory_mb = match check_function(&config) {
        Ok(memory_mb) => memory_mb,
        Err(reason) => return skip(reason),
    };

    let query = EventQuery {
        log_group_name: log_group.to_string(),
        filter_pattern: INIT_FILTER_PATTERN.to_string(),
        start_ms: window.start_ms,
        end_ms: window.end_ms,
        page_size: EVENTS_PAGE_SIZE,
    };

    let mut events = event_messages(logs, &query, args.max_events_per_group);
    let messages = match events.by_ref().collect::<Result<Vec<String>, AwsError>>() {
        Ok(messages) => messages,
        Err(e) => {
            debug!("{}: {}", function_name, e);
            return skip(SkipReason::QueryFailed(e.code().to_string()));
        }
    };

    if messages.is_empty() {
        return skip(SkipReason::NoColdStarts);
    }

    if events.is_truncated() {
        warn!(
            "{}: event cap of {} reached, estimate covers only the first {} cold starts",
            function_name, args.max_events_per_group, args.max_events_per_group
        );
    }

    info!("{}: {} cold starts found", function_name, messages.len());

    let parsed = parse_init_durations(function_name, &messages);

    match estimate_function(function_name, &parsed.durations, memory_mb, &args.pricing) {
        Some(report) => FunctionOutcome::Reported(report),
        None => skip(SkipReason::NoParsableDurations {
            malformed: parsed.malformed,
        }),
    }
}

/// Function name for a log group: `/aws/lambda/` stripped, or the last path segment
///
/// Never strips `--log-group-prefix`, which only narrows the listing.
pub fn function_name_from_log_group(log_group: &str) -> &str {
    log_group
        .strip_prefix(LAMBDA_LOG_GROUP_PREFIX)
        .filter(|name| !name.contains('/'))
        .unwrap_or_else(|| log_group.rsplit('/').next().unwrap_or(log_group))
}

/// Validate scan arguments
///
/// **Public** - can be called before execute_scan for early validation
pub fn validate_args(args: &ScanArgs) -> Result<(), ConfigError> {
    if args.days == 0 || args.days > MAX_DAYS_BACK {
        return Err(ConfigError::InvalidArgument(format!(
            "days must be between 1 and {}",
            MAX_DAYS_BACK
        )));
    }

    if args.pricing.price_per_gb_second <= Decimal::ZERO {
        return Err(ConfigError::InvalidArgument(
            "price per GB-second must be greater than 0".to_string(),
        ));
    }

    if args.max_events_per_group == 0 {
        return Err(ConfigError::InvalidArgument(
            "max events per log group must be greater than 0".to_string(),
        ));
    }

    if args.outfile.as_os_str().is_empty() {
        return Err(ConfigError::InvalidArgument("outfile cannot be empty".to_string()));
    }

    if args.log_group_prefix.is_empty() {
        return Err(ConfigError::InvalidArgument(
            "log group prefix cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Exit with code 130 on Ctrl-C
///
/// The report is only written after the scan finishes, so an interrupted
/// run leaves no output file behind.
pub fn watch_for_interrupt(handle: &Handle) {
    handle.spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted by user - exiting");
            std::process::exit(INTERRUPT_EXIT_CODE);
        }
    });
}

/// Text summary of the costliest functions
///
/// `reports` is expected to be sorted already.
pub fn render_summary(reports: &[FunctionReport], totals: &RunTotals) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", "=".repeat(80)));
    out.push_str("LAMBDA INIT COST SUMMARY\n");
    out.push_str(&format!("{}\n", "=".repeat(80)));
    out.push_str(&format!(
        "Functions analyzed: {} ({} reported, {} skipped)\n",
        totals.functions_analyzed, totals.functions_reported, totals.functions_skipped
    ));
    out.push_str(&format!("Cold starts:        {}\n", totals.cold_starts));
    out.push_str(&format!(
        "Total monthly cost: ${}\n\n",
        format_fixed(totals.total(), COST_DECIMAL_PLACES)
    ));

    for (i, report) in reports.iter().take(SUMMARY_TOP_N).enumerate() {
        out.push_str(&format!(
            "{:>3}. {:<48} {:>8} x {:>9} ms  ${}\n",
            i + 1,
            report.name,
            report.cold_start_count,
            format_fixed(report.avg_init_ms, AVG_MS_DECIMAL_PLACES),
            format_fixed(report.monthly_cost_usd, COST_DECIMAL_PLACES)
        ));
    }

    out.push_str(&"=".repeat(80));
    out
}
