//! Key-value persistence with per-entry time-to-live
//!
//! Per-host package records and the shared EOL cache document both live in
//! one store. Entries are opaque strings; expiry is the only eviction path.
//!
//! # Modules
//!
//! - [`error`]: Error type for store operations
//! - [`sqlite`]: SQLite-backed implementation

pub mod error;
pub mod sqlite;

use std::sync::Arc;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

pub use error::StoreError;
pub use sqlite::SqliteStore;

/// Trait for storing string values under string keys with a TTL
#[cfg_attr(test, automock)]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Store a value, replacing any previous value and TTL for the key
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError>;

    /// Get the value for a key, or None if absent or expired
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// List all keys that have not expired
    fn keys(&self) -> Result<Vec<String>, StoreError>;

    /// Delete expired entries, returning how many were removed
    fn purge_expired(&self) -> Result<usize, StoreError>;
}

/// Run a store operation on the blocking thread pool.
///
/// Store calls may wait on SQLite locks and must not stall async workers.
pub async fn run_blocking<S, T, F>(store: &Arc<S>, op: F) -> Result<T, StoreError>
where
    S: KeyValueStore + ?Sized,
    T: Send + 'static,
    F: FnOnce(&S) -> Result<T, StoreError> + Send + 'static,
{
    let store = Arc::clone(store);
    tokio::task::spawn_blocking(move || op(&store)).await?
}
