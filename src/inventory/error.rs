use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Marshal failed: {0}")]
    Marshal(#[from] serde_json::Error),

    #[error("Insert failed: {0}")]
    StoreWrite(#[source] StoreError),

    #[error("Read failed: {0}")]
    StoreRead(#[source] StoreError),

    #[error("ID not found: {0}")]
    NotFound(Uuid),
}
