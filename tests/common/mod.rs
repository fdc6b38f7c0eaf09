//! In-memory stand-ins for CloudWatch Logs and Lambda.

use lambda_init_costs::aws::{EventQuery, FunctionConfig, FunctionsApi, LogsApi, Page};
use lambda_init_costs::utils::AwsError;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

pub const PREFIX: &str = "/aws/lambda/";

/// A fake account: log groups, function configurations and REPORT lines
#[derive(Default)]
pub struct FakeAccount {
    groups: Vec<String>,
    configs: HashMap<String, FunctionConfig>,
    events: HashMap<String, Vec<String>>,
    failing_queries: HashSet<String>,
    pub fail_listing: bool,
    pub group_page_size: usize,
    pub event_page_size: usize,
    pub queries: RefCell<Vec<EventQuery>>,
    pub event_calls: RefCell<usize>,
}

impl FakeAccount {
    pub fn new() -> Self {
        Self {
            group_page_size: 2,
            event_page_size: 1_000,
            ..Default::default()
        }
    }

    /// Register a function with its log group and REPORT lines
    pub fn function(mut self, name: &str, config: FunctionConfig, messages: Vec<String>) -> Self {
        let group = format!("{}{}", PREFIX, name);
        self.groups.push(group.clone());
        self.configs.insert(name.to_string(), config);
        self.events.insert(group, messages);
        self
    }

    /// A log group whose function no longer exists
    pub fn orphan_group(mut self, name: &str) -> Self {
        self.groups.push(format!("{}{}", PREFIX, name));
        self
    }

    pub fn failing_query(mut self, name: &str, config: FunctionConfig) -> Self {
        let group = format!("{}{}", PREFIX, name);
        self.groups.push(group.clone());
        self.configs.insert(name.to_string(), config);
        self.failing_queries.insert(group);
        self
    }
}

fn page_of(items: &[String], token: Option<String>, size: usize) -> Page<String> {
    let start: usize = token.map(|t| t.parse().unwrap()).unwrap_or(0);
    let end = (start + size).min(items.len());
    let slice = items[start..end].to_vec();
    if end < items.len() {
        Page::with_next(slice, end.to_string())
    } else {
        Page::last(slice)
    }
}

fn api_error(operation: &'static str, code: &str) -> AwsError {
    AwsError::Api {
        operation,
        code: code.to_string(),
        message: format!("{} failed", operation),
    }
}

impl LogsApi for FakeAccount {
    fn describe_log_groups(
        &self,
        prefix: &str,
        next_token: Option<String>,
    ) -> Result<Page<String>, AwsError> {
        if self.fail_listing {
            return Err(api_error("DescribeLogGroups", "AccessDeniedException"));
        }
        let matching: Vec<String> = self
            .groups
            .iter()
            .filter(|g| g.starts_with(prefix))
            .cloned()
            .collect();
        Ok(page_of(&matching, next_token, self.group_page_size))
    }

    fn filter_log_events(
        &self,
        query: &EventQuery,
        next_token: Option<String>,
    ) -> Result<Page<String>, AwsError> {
        self.queries.borrow_mut().push(query.clone());
        *self.event_calls.borrow_mut() += 1;

        if self.failing_queries.contains(&query.log_group_name) {
            return Err(api_error("FilterLogEvents", "ThrottlingException"));
        }
        let events = self
            .events
            .get(&query.log_group_name)
            .cloned()
            .unwrap_or_default();
        Ok(page_of(&events, next_token, self.event_page_size))
    }
}

impl FunctionsApi for FakeAccount {
    fn get_function_configuration(&self, function_name: &str) -> Result<FunctionConfig, AwsError> {
        self.configs
            .get(function_name)
            .cloned()
            .ok_or_else(|| api_error("GetFunctionConfiguration", "ResourceNotFoundException"))
    }
}

pub fn zip(runtime: &str, memory_mb: u32) -> FunctionConfig {
    FunctionConfig {
        package_type: Some("Zip".to_string()),
        runtime: Some(runtime.to_string()),
        memory_size_mb: Some(memory_mb),
    }
}

pub fn image() -> FunctionConfig {
    FunctionConfig {
        package_type: Some("Image".to_string()),
        runtime: None,
        memory_size_mb: Some(2048),
    }
}

/// A REPORT line with the given init duration
pub fn report_line(init_ms: &str) -> String {
    format!(
        "REPORT RequestId: 6d3c6f1e-0000-4000-8000-000000000000\tDuration: 3.21 ms\t\
         Billed Duration: 4 ms\tMemory Size: 128 MB\tMax Memory Used: 70 MB\t\
         Init Duration: {} ms\t\n",
        init_ms
    )
}

pub fn report_lines(init_ms: &str, count: usize) -> Vec<String> {
    (0..count).map(|_| report_line(init_ms)).collect()
}
