//! Blocking adapter over the AWS SDK clients.
//!
//! The SDK is async; [`AwsClients`] owns a small tokio runtime and blocks on
//! each call, keeping the scan itself strictly sequential.

use super::types::{EventQuery, FunctionConfig, FunctionsApi, LogsApi, Page};
use crate::utils::config::{DEFAULT_OPERATION_TIMEOUT, LOG_GROUPS_PAGE_SIZE, SDK_WORKER_THREADS};
use crate::utils::error::AwsError;
use aws_config::meta::region::RegionProviderChain;
use aws_config::profile::ProfileFileRegionProvider;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_lambda::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use log::debug;
use tokio::runtime::{Handle, Runtime};

/// CloudWatch Logs and Lambda clients for one region
pub struct AwsClients {
    runtime: Runtime,
    logs: aws_sdk_cloudwatchlogs::Client,
    lambda: aws_sdk_lambda::Client,
    region: String,
}

impl AwsClients {
    /// Load the default credential chain and build clients for `region`
    pub fn connect(runtime: Runtime, region: &str) -> Self {
        debug!("Loading AWS configuration for region {}", region);

        let sdk_config = runtime.block_on(
            aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(region.to_string()))
                .timeout_config(
                    TimeoutConfig::builder()
                        .operation_timeout(DEFAULT_OPERATION_TIMEOUT)
                        .build(),
                )
                .load(),
        );

        Self {
            logs: aws_sdk_cloudwatchlogs::Client::new(&sdk_config),
            lambda: aws_sdk_lambda::Client::new(&sdk_config),
            runtime,
            region: region.to_string(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Handle for spawning background tasks on the SDK runtime
    pub fn handle(&self) -> Handle {
        self.runtime.handle().clone()
    }
}

impl LogsApi for AwsClients {
    fn describe_log_groups(
        &self,
        prefix: &str,
        next_token: Option<String>,
    ) -> Result<Page<String>, AwsError> {
        let output = self
            .runtime
            .block_on(
                self.logs
                    .describe_log_groups()
                    .log_group_name_prefix(prefix)
                    .limit(LOG_GROUPS_PAGE_SIZE)
                    .set_next_token(next_token)
                    .send(),
            )
            .map_err(|e| api_error("DescribeLogGroups", e))?;

        let items = output
            .log_groups()
            .iter()
            .filter_map(|group| group.log_group_name().map(str::to_string))
            .collect();

        Ok(Page {
            items,
            next_token: output.next_token().map(str::to_string),
        })
    }

    fn filter_log_events(
        &self,
        query: &EventQuery,
        next_token: Option<String>,
    ) -> Result<Page<String>, AwsError> {
        let output = self
            .runtime
            .block_on(
                self.logs
                    .filter_log_events()
                    .log_group_name(&query.log_group_name)
                    .filter_pattern(&query.filter_pattern)
                    .start_time(query.start_ms)
                    .end_time(query.end_ms)
                    .limit(query.page_size)
                    .set_next_token(next_token)
                    .send(),
            )
            .map_err(|e| api_error("FilterLogEvents", e))?;

        let items = output
            .events()
            .iter()
            .filter_map(|event| event.message().map(str::to_string))
            .collect();

        Ok(Page {
            items,
            next_token: output.next_token().map(str::to_string),
        })
    }
}

impl FunctionsApi for AwsClients {
    fn get_function_configuration(&self, function_name: &str) -> Result<FunctionConfig, AwsError> {
        let output = self
            .runtime
            .block_on(
                self.lambda
                    .get_function_configuration()
                    .function_name(function_name)
                    .send(),
            )
            .map_err(|e| api_error("GetFunctionConfiguration", e))?;

        Ok(FunctionConfig {
            package_type: output.package_type().map(|p| p.as_str().to_string()),
            runtime: output.runtime().map(|r| r.as_str().to_string()),
            memory_size_mb: output
                .memory_size()
                .and_then(|mb| u32::try_from(mb).ok()),
        })
    }
}

/// Build a multi-threaded runtime sized for sequential SDK calls
pub fn build_runtime() -> Result<Runtime, AwsError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(SDK_WORKER_THREADS)
        .thread_name("aws-sdk")
        .enable_all()
        .build()?;
    Ok(runtime)
}

/// Region of the active shared-config profile, if it sets one
pub fn profile_region(runtime: &Runtime) -> Option<String> {
    let chain = RegionProviderChain::first_try(ProfileFileRegionProvider::new());
    runtime
        .block_on(chain.region())
        .map(|region| region.as_ref().to_string())
}

/// Map an SDK error to our error type, keeping the service error code
fn api_error<E>(operation: &'static str, err: SdkError<E>) -> AwsError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let code = err.code().unwrap_or("Unknown").to_string();
    AwsError::Api {
        operation,
        code,
        message: DisplayErrorContext(err).to_string(),
    }
}
