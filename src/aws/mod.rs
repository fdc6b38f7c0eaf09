//! AWS access: the service seams, pagination, and the SDK-backed client.

pub mod client;
pub mod paginate;
pub mod types;

pub use client::{build_runtime, profile_region, AwsClients};
pub use paginate::{event_messages, log_group_names, PageState, Paginated};
pub use types::{EventQuery, FunctionConfig, FunctionsApi, LogsApi, Page};
