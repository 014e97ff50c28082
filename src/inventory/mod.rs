//! Host inventory aggregation
//!
//! Turns a submitted package inventory into a [`PackageRecord`] with one
//! freshness verdict per package and persists it under an identifier
//! derived from the host.
//!
//! # Modules
//!
//! - [`aggregator`]: Per-package resolution, record assembly, retrieval and scan
//! - [`id`]: Deterministic record identifiers
//! - [`types`]: Inventory, verdict and record types
//! - [`error`]: Error type for inventory operations

pub mod aggregator;
pub mod error;
pub mod id;
pub mod types;

pub use aggregator::InventoryAggregator;
pub use error::InventoryError;
pub use types::{PackageDetail, PackageInventory, PackageRecord};
