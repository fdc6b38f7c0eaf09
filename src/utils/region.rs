//! Region resolution.
//!
//! Order: explicit `--region`, then `$AWS_REGION`, then the region of the
//! active shared-config profile. Blank values count as unset.

use crate::utils::error::ConfigError;
use log::debug;

/// Where the resolved region came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionSource {
    Flag,
    Environment,
    Profile,
}

/// A resolved region and its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRegion {
    pub name: String,
    pub source: RegionSource,
}

/// Resolve the target region
///
/// `profile` is only consulted when neither the flag nor the environment
/// yields a value, since reading the profile touches the filesystem.
pub fn resolve_region<F>(
    explicit: Option<&str>,
    env_value: Option<&str>,
    profile: F,
) -> Result<ResolvedRegion, ConfigError>
where
    F: FnOnce() -> Option<String>,
{
    if let Some(name) = non_blank(explicit) {
        return Ok(ResolvedRegion {
            name,
            source: RegionSource::Flag,
        });
    }

    if let Some(name) = non_blank(env_value) {
        return Ok(ResolvedRegion {
            name,
            source: RegionSource::Environment,
        });
    }

    debug!("No region from flag or environment, checking AWS profile");

    match non_blank(profile().as_deref()) {
        Some(name) => Ok(ResolvedRegion {
            name,
            source: RegionSource::Profile,
        }),
        None => Err(ConfigError::NoRegion),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
