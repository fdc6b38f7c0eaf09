//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors raised before any remote call is made
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "AWS region not set\n\
         Supply --region, set $AWS_REGION, or configure a default region in the AWS CLI."
    )]
    NoRegion,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors that can occur while talking to CloudWatch Logs or Lambda
#[derive(Error, Debug)]
pub enum AwsError {
    #[error("{operation} failed ({code}): {message}")]
    Api {
        operation: &'static str,
        code: String,
        message: String,
    },

    #[error("Failed to start AWS SDK runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

impl AwsError {
    /// Service error code, e.g. `ResourceNotFoundException`
    pub fn code(&self) -> &str {
        match self {
            AwsError::Api { code, .. } => code,
            AwsError::Runtime(_) => "RuntimeError",
        }
    }
}

/// Errors that can occur while reading a REPORT log line
#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("Init Duration marker not found")]
    MissingMarker,

    #[error("Invalid init duration token: {0:?}")]
    InvalidDuration(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
