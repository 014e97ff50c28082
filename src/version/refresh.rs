//! Wholesale repopulation of the EOL cache document

use std::time::Duration;

use futures::future::join_all;
use tokio::time::{sleep, timeout};
use tracing::{info, warn};

use crate::config::FETCH_STAGGER_DELAY_MS;
use crate::version::error::SourceError;
use crate::version::source::EolSource;
use crate::version::types::{EndOfLifeEntry, EolCacheDocument};

/// Fetch a single package's release cycles, bounded by `fetch_timeout`
async fn fetch_package_cycles(
    source: &dyn EolSource,
    package_name: &str,
    fetch_timeout: Duration,
) -> Result<Vec<EndOfLifeEntry>, SourceError> {
    timeout(fetch_timeout, source.fetch_cycles(package_name))
        .await
        .unwrap_or(Err(SourceError::Timeout(fetch_timeout.as_millis() as u64)))
}

/// Build a fresh cache document from every package in `packages`
///
/// Each package is fetched independently. A package whose fetch fails or
/// times out is logged and left out of the document; it never fails the
/// whole refresh. Fetches run in parallel with staggered start times to
/// avoid rate limiting, and the document keeps the order of `packages`.
pub async fn fetch_all_cycles(
    source: &dyn EolSource,
    packages: &[&str],
    fetch_timeout: Duration,
) -> EolCacheDocument {
    let futures = packages.iter().enumerate().map(|(i, &package_name)| {
        let delay = Duration::from_millis(FETCH_STAGGER_DELAY_MS * i as u64);
        async move {
            sleep(delay).await;
            match fetch_package_cycles(source, package_name, fetch_timeout).await {
                Ok(entries) => {
                    info!(
                        "Fetched {} release cycles for {}",
                        entries.len(),
                        package_name
                    );
                    Some((package_name.to_string(), entries))
                }
                Err(e) => {
                    warn!("Skipping {} in EOL refresh: {}", package_name, e);
                    None
                }
            }
        }
    });

    EolCacheDocument {
        package: join_all(futures).await.into_iter().flatten().collect(),
    }
}
