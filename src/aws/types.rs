//! Types shared by the AWS adapter and the scan pipeline.
//!
//! The pipeline only sees the two traits below, so tests can drive it
//! with in-memory accounts instead of live services.

use crate::utils::error::AwsError;

/// One page of a paginated listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Token for the following page; `None` on the last page
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next_token: None }
    }

    pub fn with_next(items: Vec<T>, next_token: impl Into<String>) -> Self {
        Self { items, next_token: Some(next_token.into()) }
    }
}

/// A time-windowed FilterLogEvents query against one log group
#[derive(Debug, Clone, PartialEq)]
pub struct EventQuery {
    pub log_group_name: String,
    pub filter_pattern: String,
    /// Inclusive start, milliseconds since the epoch
    pub start_ms: i64,
    /// Inclusive end, milliseconds since the epoch
    pub end_ms: i64,
    pub page_size: i32,
}

/// The parts of GetFunctionConfiguration the filter needs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionConfig {
    pub package_type: Option<String>,
    pub runtime: Option<String>,
    pub memory_size_mb: Option<u32>,
}

/// CloudWatch Logs operations used by the scan
pub trait LogsApi {
    /// Fetch one page of log group names starting with `prefix`
    fn describe_log_groups(
        &self,
        prefix: &str,
        next_token: Option<String>,
    ) -> Result<Page<String>, AwsError>;

    /// Fetch one page of matching event messages
    fn filter_log_events(
        &self,
        query: &EventQuery,
        next_token: Option<String>,
    ) -> Result<Page<String>, AwsError>;
}

/// Lambda operations used by the scan
pub trait FunctionsApi {
    fn get_function_configuration(&self, function_name: &str) -> Result<FunctionConfig, AwsError>;
}
