//! Deterministic record identifiers

use uuid::Uuid;

/// Salt appended to package record names so they never collide with other
/// record kinds derived from the same host
pub const PACKAGE_ID_SALT: &str = "PACKAGE_UUID";

/// Derive the identifier of a host's package record.
///
/// UUID v5 (SHA-1, DNS namespace) over `"<data_center>-<host_ip>-PACKAGE_UUID"`,
/// so resubmitting for the same host overwrites the same record.
pub fn record_id(data_center: &str, host_ip: &str) -> Uuid {
    let name = format!("{}-{}-{}", data_center, host_ip, PACKAGE_ID_SALT);
    Uuid::new_v5(&Uuid::NAMESPACE_DNS, name.as_bytes())
}
