use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

// =============================================================================
// Time-related constants
// =============================================================================

/// Upper bound on waiting for the store when reading the EOL cache (5 seconds)
pub const CACHE_READ_TIMEOUT_MS: u64 = 5_000;

/// Timeout for a single EOL source fetch in milliseconds (10 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 10_000;

/// Delay between starting each fetch request to avoid rate limiting (10ms)
pub const FETCH_STAGGER_DELAY_MS: u64 = 10;

/// Lifetime of the shared EOL cache document (7 days)
pub const EOL_CACHE_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Interval between sweeps of expired store entries (5 minutes)
pub const PURGE_INTERVAL_SECS: u64 = 300;

/// Default lifetime of a per-host package record (24 hours)
pub const DEFAULT_TTL_SECONDS: u64 = 24 * 60 * 60;

// =============================================================================
// EOL cache
// =============================================================================

/// Store key of the shared EOL cache document.
///
/// Never a UUID, so record scans skip it.
pub const EOL_CACHE_KEY: &str = "eol_cache:all_packages";

/// Packages that can be resolved against the EOL source.
pub const SUPPORTED_PACKAGES: &[&str] = &[
    "redis",
    "memcached",
    "mongodb",
    "mysql",
    "rabbitmq",
    "envoy",
    "debian",
    "postgresql",
    "elasticsearch",
];

/// Returns true if the package belongs to the supported universe.
pub fn is_supported(package_name: &str) -> bool {
    SUPPORTED_PACKAGES.contains(&package_name)
}

/// Server configuration, read from flags with environment fallbacks
#[derive(Debug, Clone, Args, PartialEq)]
pub struct ServerConfig {
    /// Port the HTTP server listens on
    #[arg(long, env = "LISTEN_PORT", default_value_t = 8080)]
    pub listen_port: u16,

    /// Token expected in the x-api-token header
    #[arg(long, env = "API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    /// Lifetime of submitted package records in seconds
    #[arg(long, env = "TTL_SECONDS", default_value_t = DEFAULT_TTL_SECONDS)]
    pub ttl_seconds: u64,

    /// Path of the SQLite store (defaults to the data directory)
    #[arg(long, env = "KEEPUP_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Base URL of the endoflife.date compatible API
    #[arg(long, env = "EOL_API_URL", default_value = "https://endoflife.date")]
    pub eol_api_url: String,
}

impl ServerConfig {
    pub fn record_ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    pub fn resolved_db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(db_path)
    }
}

/// Returns the path to the data directory for keepup.
/// Uses $XDG_DATA_HOME/keepup if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/keepup,
/// or ./keepup if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the default path to the database file.
pub fn db_path() -> PathBuf {
    data_dir().join("keepup.db")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("keepup")
}
