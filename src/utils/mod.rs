//! Utility modules for configuration, region resolution and error handling.

pub mod config;
pub mod error;
pub mod region;

// Re-export commonly used error types for convenience
pub use error::{AwsError, ConfigError, OutputError, ParseError};
pub use region::{resolve_region, RegionSource, ResolvedRegion};
