//! Configuration and constants for the CLI.

use rust_decimal::Decimal;
use std::time::Duration;

/// Default look-back window in days
pub const DEFAULT_DAYS_BACK: u32 = 30;

/// CloudWatch Logs retention tops out at ten years
pub const MAX_DAYS_BACK: u32 = 3_653;

/// Default destination for the CSV report
pub const DEFAULT_OUTFILE: &str = "lambda_init_costs_filtered.csv";

/// Environment variable consulted when `--region` is absent
pub const REGION_ENV_VAR: &str = "AWS_REGION";

/// Environment variable overriding the GB-second price
pub const PRICE_ENV_VAR: &str = "LAMBDA_INIT_PRICE_PER_GB_SECOND";

// Lambda price per GB-second, 2025-07 snapshot (0.0000166667 USD). AWS
// changes this, so it is only the default for `--price-per-gb-second`.
pub const DEFAULT_PRICE_PER_GB_SECOND: Decimal = Decimal::from_parts(166_667, 0, 0, false, 10);

/// Log groups written by Lambda functions share this prefix
pub const LAMBDA_LOG_GROUP_PREFIX: &str = "/aws/lambda/";

/// CloudWatch filter pattern matching REPORT lines with an init phase.
/// The quotes make it an exact phrase match.
pub const INIT_FILTER_PATTERN: &str = "\"Init Duration\"";

/// Marker preceding the duration token in a REPORT line
pub const INIT_DURATION_MARKER: &str = "Init Duration: ";

/// Events requested per FilterLogEvents page
pub const EVENTS_PAGE_SIZE: i32 = 1_000;

/// Upper bound on events fetched per log group
pub const DEFAULT_MAX_EVENTS_PER_GROUP: usize = 100_000;

/// Log groups requested per DescribeLogGroups page (API maximum)
pub const LOG_GROUPS_PAGE_SIZE: i32 = 50;

/// Package type accepted by the filter
pub const ZIP_PACKAGE_TYPE: &str = "Zip";

/// Runtime prefix shared by custom (OS-only) runtimes, e.g. `provided.al2023`
pub const CUSTOM_RUNTIME_PREFIX: &str = "provided";

/// Lambda's default memory allocation when the configuration omits it
pub const DEFAULT_MEMORY_MB: u32 = 128;

/// Decimal places of a row cost and of the grand total
pub const COST_DECIMAL_PLACES: u32 = 6;

/// Decimal places of the average init duration column
pub const AVG_MS_DECIMAL_PLACES: u32 = 2;

/// Rows shown by `--summary`
pub const SUMMARY_TOP_N: usize = 10;

/// Exit code after SIGINT, following the shell convention of 128 + 2
pub const INTERRUPT_EXIT_CODE: i32 = 130;

/// Worker threads of the runtime driving the AWS SDK
pub const SDK_WORKER_THREADS: usize = 2;

/// Ceiling on a single AWS operation, retries included
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(60);
