use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::{
    EOL_CACHE_KEY, EOL_CACHE_TTL_SECS, FETCH_TIMEOUT_MS, SUPPORTED_PACKAGES, is_supported,
};
use crate::store::{KeyValueStore, run_blocking};
use crate::version::checker::EolResolver;
use crate::version::error::LookupError;
use crate::version::refresh::fetch_all_cycles;
use crate::version::source::EolSource;
use crate::version::types::{EndOfLifeEntry, EolCacheDocument, LatestRelease};

/// Read-through cache of upstream EOL data.
///
/// All packages share one document stored under [`EOL_CACHE_KEY`]. A miss
/// rebuilds that document from the source for the whole supported universe
/// and overwrites it; documents are never merged.
pub struct EolCache<S: KeyValueStore> {
    store: Arc<S>,
    source: Arc<dyn EolSource>,
    fetch_timeout: Duration,
    /// Serializes refreshes within this process
    refresh_guard: Mutex<()>,
}

impl<S: KeyValueStore> EolCache<S> {
    pub fn new(store: Arc<S>, source: Arc<dyn EolSource>) -> Self {
        Self {
            store,
            source,
            fetch_timeout: Duration::from_millis(FETCH_TIMEOUT_MS),
            refresh_guard: Mutex::new(()),
        }
    }

    /// Override the per-package fetch timeout used during refresh
    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Read the shared document. Any failure to read or parse it is a miss.
    pub async fn read_document(&self) -> Option<EolCacheDocument> {
        let data = run_blocking(&self.store, |store| store.get(EOL_CACHE_KEY))
            .await
            .inspect_err(|e| warn!("Failed to read EOL cache: {}", e))
            .ok()??;

        serde_json::from_str(&data)
            .inspect_err(|e| warn!("Discarding unparseable EOL cache: {}", e))
            .ok()
    }

    /// Resolve from the cached document only. None means a miss.
    async fn cached_release(
        &self,
        package_name: &str,
    ) -> Option<Result<LatestRelease, LookupError>> {
        let document = self.read_document().await?;
        let cycles = document.cycles(package_name)?;
        Some(select_release(package_name, cycles))
    }

    /// Rebuild the cache document from the source and overwrite the stored one
    pub async fn refresh_all(&self) -> Result<EolCacheDocument, LookupError> {
        info!(
            "Refreshing EOL cache for {} packages",
            SUPPORTED_PACKAGES.len()
        );

        let document =
            fetch_all_cycles(self.source.as_ref(), SUPPORTED_PACKAGES, self.fetch_timeout).await;
        let data = serde_json::to_string(&document)?;
        run_blocking(&self.store, move |store| {
            store.set(
                EOL_CACHE_KEY,
                &data,
                Duration::from_secs(EOL_CACHE_TTL_SECS),
            )
        })
        .await?;

        info!(
            "EOL cache refreshed with {}/{} packages",
            document.package.len(),
            SUPPORTED_PACKAGES.len()
        );
        Ok(document)
    }

    /// Resolve the latest release of a package, refreshing the cache on a miss.
    ///
    /// A lookup refreshes at most once and retries the read exactly once
    /// after its refresh. Packages outside the supported universe can never
    /// be populated, so they fail without touching the cache.
    pub async fn lookup(&self, package_name: &str) -> Result<LatestRelease, LookupError> {
        if !is_supported(package_name) {
            return Err(LookupError::Unsupported(package_name.to_string()));
        }

        if let Some(result) = self.cached_release(package_name).await {
            debug!("EOL cache hit for {}", package_name);
            return result;
        }

        let _guard = self.refresh_guard.lock().await;

        // A concurrent lookup may have refreshed while we waited
        if let Some(result) = self.cached_release(package_name).await {
            debug!("EOL cache populated by concurrent refresh for {}", package_name);
            return result;
        }

        debug!("EOL cache miss for {}", package_name);
        self.refresh_all().await?;

        self.cached_release(package_name)
            .await
            .unwrap_or_else(|| Err(LookupError::NotCached(package_name.to_string())))
    }
}

#[async_trait::async_trait]
impl<S: KeyValueStore> EolResolver for EolCache<S> {
    async fn lookup(&self, package_name: &str) -> Result<LatestRelease, LookupError> {
        EolCache::lookup(self, package_name).await
    }
}

/// Pick the release cycle to report for `target`.
///
/// Prefers the cycle whose identifier equals `target`; otherwise falls back
/// to the first cycle in upstream order. The fallback depends on how the
/// source orders cycles (newest first on endoflife.date) and is suspect.
fn select_release(target: &str, cycles: &[EndOfLifeEntry]) -> Result<LatestRelease, LookupError> {
    let entry = cycles
        .iter()
        .find(|entry| entry.cycle == target)
        .or_else(|| cycles.first())
        .ok_or_else(|| LookupError::NoCycles(target.to_string()))?;

    Ok(LatestRelease {
        latest_version: entry.latest.clone(),
        eol: entry.eol.clone(),
    })
}
