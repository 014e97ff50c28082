//! Source trait for fetching release cycles from an EOL service

#[cfg(test)]
use mockall::automock;

use crate::version::error::SourceError;
use crate::version::types::EndOfLifeEntry;

/// Trait for fetching release-cycle data of a package
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait EolSource: Send + Sync {
    /// Fetches all release cycles for a package
    ///
    /// # Arguments
    /// * `package_name` - The product name as known upstream (e.g., "redis")
    ///
    /// # Returns
    /// * `Ok(Vec<EndOfLifeEntry>)` - Cycles in upstream order, newest first
    /// * `Err(SourceError)` - If the fetch fails
    async fn fetch_cycles(&self, package_name: &str) -> Result<Vec<EndOfLifeEntry>, SourceError>;
}
