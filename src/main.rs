//! Lambda Init Costs CLI
//!
//! Estimates the monthly cost of cold-start init duration across all
//! ZIP-based Lambda functions in an AWS account and region.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use rust_decimal::Decimal;
use std::path::PathBuf;

use lambda_init_costs::aggregator::Pricing;
use lambda_init_costs::commands::{execute_scan, ScanArgs};
use lambda_init_costs::utils::config::{
    DEFAULT_DAYS_BACK, DEFAULT_MAX_EVENTS_PER_GROUP, DEFAULT_OUTFILE, DEFAULT_PRICE_PER_GB_SECOND,
    LAMBDA_LOG_GROUP_PREFIX, PRICE_ENV_VAR,
};

/// Estimate the monthly cost of cold-start init duration across all
/// ZIP-based Lambda functions in an AWS account
#[derive(Parser, Debug)]
#[command(name = "lambda-init-costs")]
#[command(version, about, long_about = None)]
struct Cli {
    /// AWS region (falls back to $AWS_REGION or the current AWS profile)
    #[arg(long)]
    region: Option<String>,

    /// How many days back to scan CloudWatch Logs
    #[arg(long, default_value_t = DEFAULT_DAYS_BACK)]
    days: u32,

    /// Destination CSV file
    #[arg(long, default_value = DEFAULT_OUTFILE)]
    outfile: PathBuf,

    /// Lambda price per GB-second in USD
    #[arg(long, env = PRICE_ENV_VAR, default_value_t = DEFAULT_PRICE_PER_GB_SECOND)]
    price_per_gb_second: Decimal,

    /// Maximum log events fetched per log group
    #[arg(long, default_value_t = DEFAULT_MAX_EVENTS_PER_GROUP)]
    max_events: usize,

    /// Log group prefix identifying Lambda functions
    #[arg(long, default_value = LAMBDA_LOG_GROUP_PREFIX)]
    log_group_prefix: String,

    /// Print the costliest functions to stdout
    #[arg(long)]
    summary: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = ScanArgs {
        region: cli.region,
        days: cli.days,
        outfile: cli.outfile,
        pricing: Pricing::new(cli.price_per_gb_second),
        max_events_per_group: cli.max_events,
        log_group_prefix: cli.log_group_prefix,
        print_summary: cli.summary,
    };

    execute_scan(args)?;

    Ok(())
}
