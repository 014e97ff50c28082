use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Timed out after {0} ms")]
    Timeout(u64),

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Package is not supported: {0}")]
    Unsupported(String),

    #[error("No cached EOL data for package: {0}")]
    NotCached(String),

    #[error("No release cycles for package: {0}")]
    NoCycles(String),

    #[error("Failed to serialize EOL cache: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to update EOL cache: {0}")]
    Store(#[from] StoreError),
}
