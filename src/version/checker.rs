//! Expiry check for packages

#[cfg(test)]
use mockall::automock;

use crate::version::error::LookupError;
use crate::version::types::LatestRelease;

/// Trait for resolving the latest upstream release of a package
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait EolResolver: Send + Sync {
    /// Resolve the latest release and EOL marker for a package
    async fn lookup(&self, package_name: &str) -> Result<LatestRelease, LookupError>;
}

/// Decide whether a normalized version is behind the newest one.
///
/// Both sides are compared as (major, minor) integer pairs. Segments that
/// are missing or not numeric count as 0, so malformed input never expires
/// anything it cannot compare.
pub fn is_version_expired(current: &str, newest: &str) -> bool {
    parse_major_minor(current) < parse_major_minor(newest)
}

fn parse_major_minor(version: &str) -> (i64, i64) {
    let mut segments = version.split('.');
    let major = segments
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default();
    let minor = segments
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default();
    (major, minor)
}
