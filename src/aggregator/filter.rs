//! Decide which functions are eligible for the init cost estimate.
//!
//! Only ZIP-packaged functions on managed runtimes qualify: container
//! images and custom (`provided*`) runtimes are skipped.

use crate::aws::FunctionConfig;
use crate::commands::models::SkipReason;
use crate::utils::config::{CUSTOM_RUNTIME_PREFIX, DEFAULT_MEMORY_MB, ZIP_PACKAGE_TYPE};

/// Check a function configuration against the eligibility rules
///
/// # Returns
/// The memory size (MB) to price with, or the reason to skip
pub fn check_function(config: &FunctionConfig) -> Result<u32, SkipReason> {
    let package_type = config.package_type.as_deref().unwrap_or_default();
    if package_type != ZIP_PACKAGE_TYPE {
        return Err(SkipReason::NotZipPackage(package_type.to_string()));
    }

    let runtime = config.runtime.as_deref().unwrap_or_default();
    if runtime.starts_with(CUSTOM_RUNTIME_PREFIX) {
        return Err(SkipReason::CustomRuntime(runtime.to_string()));
    }

    Ok(memory_mb(config))
}

/// Configured memory, falling back to Lambda's default
pub fn memory_mb(config: &FunctionConfig) -> u32 {
    config
        .memory_size_mb
        .filter(|mb| *mb > 0)
        .unwrap_or(DEFAULT_MEMORY_MB)
}
