use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reserved inventory field carrying the data-center tag
pub const DATA_CENTER_FIELD: &str = "data_center";

/// Reserved inventory field carrying the host IP
pub const HOST_IP_FIELD: &str = "host_ip";

/// A host's reported packages with the control fields split off
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageInventory {
    pub data_center: String,
    pub host_ip: String,
    /// Package name -> raw version as reported by the host
    pub packages: BTreeMap<String, String>,
}

impl PackageInventory {
    /// Split a submitted field map into control fields and packages.
    ///
    /// Every key other than the two reserved ones is taken as a package
    /// name without further validation. Missing control fields are empty.
    pub fn from_fields(mut fields: HashMap<String, String>) -> Self {
        let data_center = fields.remove(DATA_CENTER_FIELD).unwrap_or_default();
        let host_ip = fields.remove(HOST_IP_FIELD).unwrap_or_default();

        Self {
            data_center,
            host_ip,
            packages: fields.into_iter().collect(),
        }
    }
}

/// Freshness verdict for one installed package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDetail {
    pub current_version: String,
    pub current_version_eof: String,
    pub newest_version: String,
    pub expired: bool,
}

/// Persisted aggregate of a host's package verdicts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub id: Uuid,
    pub data_center: String,
    pub host_ip: String,
    /// Unix seconds of the last submission
    pub updated_at: String,
    pub packages: BTreeMap<String, PackageDetail>,
}
