use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use crate::config::CACHE_READ_TIMEOUT_MS;
use crate::store::KeyValueStore;
use crate::store::error::StoreError;

/// SQLite-backed key-value store.
///
/// A zero TTL stores the entry without expiry.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new(db_path: &Path) -> Result<Self, StoreError> {
        info!("Initializing store database at {:?}", db_path);

        let conn = Connection::open(db_path)?;

        // Enable WAL mode for better concurrency
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(Duration::from_millis(CACHE_READ_TIMEOUT_MS))?;

        debug!("Database connection established");

        let store = Self {
            conn: Mutex::new(conn),
        };

        store.create_schema()?;
        info!("Store initialized successfully");

        Ok(store)
    }

    /// Acquire database connection lock with proper error handling
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Get current timestamp in milliseconds since UNIX epoch
    fn current_timestamp_ms() -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system time before UNIX epoch")
            .as_millis() as i64
    }

    fn create_schema(&self) -> Result<(), StoreError> {
        debug!("Creating database schema");

        let conn = self.lock_conn()?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS entries (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                expires_at INTEGER
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_expires_at ON entries(expires_at)",
            [],
        )?;

        debug!("Database schema created successfully");
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        // A TTL past the representable range never expires
        let expires_at = if ttl.is_zero() {
            None
        } else {
            i64::try_from(ttl.as_millis())
                .ok()
                .and_then(|ttl_ms| Self::current_timestamp_ms().checked_add(ttl_ms))
        };

        let conn = self.lock_conn()?;
        conn.execute(
            r#"
            INSERT INTO entries (key, value, expires_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                expires_at = excluded.expires_at
            "#,
            (key, value, expires_at),
        )?;

        debug!("Stored {} ({} bytes, ttl {:?})", key, value.len(), ttl);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let now = Self::current_timestamp_ms();
        let conn = self.lock_conn()?;
        let value = conn
            .query_row(
                r#"
                SELECT value FROM entries
                WHERE key = ?1 AND (expires_at IS NULL OR expires_at > ?2)
                "#,
                (key, now),
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let now = Self::current_timestamp_ms();
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(
            "SELECT key FROM entries WHERE expires_at IS NULL OR expires_at > ?1 ORDER BY key",
        )?;

        let keys = stmt
            .query_map([now], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(keys)
    }

    fn purge_expired(&self) -> Result<usize, StoreError> {
        let now = Self::current_timestamp_ms();
        let conn = self.lock_conn()?;
        let removed = conn.execute(
            "DELETE FROM entries WHERE expires_at IS NOT NULL AND expires_at <= ?1",
            [now],
        )?;

        if removed > 0 {
            debug!("Purged {} expired entries", removed);
        }
        Ok(removed)
    }
}
