//! Resolution and persistence of submitted inventories

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::inventory::error::InventoryError;
use crate::inventory::id::record_id;
use crate::inventory::types::{PackageDetail, PackageInventory, PackageRecord};
use crate::store::{KeyValueStore, run_blocking};
use crate::version::checker::{EolResolver, is_version_expired};
use crate::version::normalize::extract_major_minor;
use crate::version::types::{EOL_NONE, UNKNOWN_VERSION};

/// Turns host inventories into persisted package records
pub struct InventoryAggregator {
    store: Arc<dyn KeyValueStore>,
    resolver: Arc<dyn EolResolver>,
}

impl InventoryAggregator {
    pub fn new(store: Arc<dyn KeyValueStore>, resolver: Arc<dyn EolResolver>) -> Self {
        Self { store, resolver }
    }

    /// Build the verdict for one package.
    ///
    /// Lookup failures never propagate: the package is reported with an
    /// unknown newest version and no EOL.
    pub async fn resolve_package(&self, package_name: &str, raw_version: &str) -> PackageDetail {
        let current_version = extract_major_minor(raw_version);

        let (newest_version, current_version_eof) =
            match self.resolver.lookup(package_name).await {
                Ok(release) => {
                    let eol = match release.eol.as_str() {
                        "" => EOL_NONE.to_string(),
                        marker => marker.to_string(),
                    };
                    (extract_major_minor(&release.latest_version), eol)
                }
                Err(e) => {
                    debug!("Unresolved package {}: {}", package_name, e);
                    (UNKNOWN_VERSION.to_string(), EOL_NONE.to_string())
                }
            };

        let expired = is_version_expired(&current_version, &newest_version);

        PackageDetail {
            current_version,
            current_version_eof,
            newest_version,
            expired,
        }
    }

    /// Resolve every package of an inventory and store the resulting record.
    ///
    /// Packages reported as empty or "unknown" are left out. The record is
    /// written under its derived identifier with the given TTL, replacing any
    /// previous record of the same host.
    pub async fn insert(
        &self,
        inventory: PackageInventory,
        ttl: Duration,
    ) -> Result<Uuid, InventoryError> {
        let mut packages = BTreeMap::new();
        for (name, raw_version) in &inventory.packages {
            if raw_version.is_empty() || raw_version == UNKNOWN_VERSION {
                continue;
            }
            let detail = self.resolve_package(name, raw_version).await;
            packages.insert(name.clone(), detail);
        }

        let record = PackageRecord {
            id: record_id(&inventory.data_center, &inventory.host_ip),
            data_center: inventory.data_center,
            host_ip: inventory.host_ip,
            updated_at: chrono::Utc::now().timestamp().to_string(),
            packages,
        };

        let data = serde_json::to_string(&record)?;
        let key = record.id.to_string();
        run_blocking(&self.store, move |store| store.set(&key, &data, ttl))
            .await
            .map_err(InventoryError::StoreWrite)?;

        info!(
            "Stored {} packages for {}/{} as {}",
            record.packages.len(),
            record.data_center,
            record.host_ip,
            record.id
        );
        Ok(record.id)
    }

    /// Fetch a stored record by identifier
    pub async fn retrieve(&self, id: Uuid) -> Result<PackageRecord, InventoryError> {
        let key = id.to_string();
        let data = run_blocking(&self.store, move |store| store.get(&key))
            .await
            .map_err(InventoryError::StoreRead)?
            .ok_or(InventoryError::NotFound(id))?;

        Ok(serde_json::from_str(&data)?)
    }

    /// Collect every live package record.
    ///
    /// Keys that are not identifiers (such as the EOL cache) are skipped, as
    /// are records that expire or fail to decode during the scan.
    pub async fn scan(&self) -> Result<BTreeMap<Uuid, PackageRecord>, InventoryError> {
        let keys = run_blocking(&self.store, |store| store.keys())
            .await
            .map_err(InventoryError::StoreRead)?;

        let mut records = BTreeMap::new();
        for id in keys.iter().filter_map(|key| Uuid::parse_str(key).ok()) {
            match self.retrieve(id).await {
                Ok(record) => {
                    records.insert(id, record);
                }
                Err(e) => warn!("Skipping record {} in scan: {}", id, e),
            }
        }

        Ok(records)
    }
}
