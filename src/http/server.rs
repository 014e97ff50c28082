//! HTTP server initialization and lifecycle

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::{PURGE_INTERVAL_SECS, ServerConfig};
use crate::http::auth::ApiToken;
use crate::http::routes::{AppState, router};
use crate::inventory::InventoryAggregator;
use crate::store::{KeyValueStore, SqliteStore, run_blocking};
use crate::version::cache::EolCache;
use crate::version::sources::EndOfLifeDateSource;

/// Open the store, wire the freshness pipeline and serve until a shutdown
/// signal arrives
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let db_path = config.resolved_db_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let store = Arc::new(SqliteStore::new(&db_path)?);
    let source = Arc::new(EndOfLifeDateSource::new(&config.eol_api_url));
    let cache = Arc::new(EolCache::new(store.clone(), source));
    let aggregator = Arc::new(InventoryAggregator::new(store.clone(), cache));

    let app = router(
        AppState::new(aggregator, config.record_ttl()),
        ApiToken::new(&config.api_token),
    );

    let sweeper = spawn_purge_task(store);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("Starting http server on {} (build {})", addr, env!("CARGO_PKG_VERSION"));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    info!("Exiting server");
    Ok(())
}

/// Periodically delete expired store entries
fn spawn_purge_task<S: KeyValueStore>(store: Arc<S>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(PURGE_INTERVAL_SECS));
        loop {
            interval.tick().await;
            if let Err(e) = run_blocking(&store, |store| store.purge_expired()).await {
                error!("Failed to purge expired entries: {}", e);
            }
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::quit()),
        ) {
            (Ok(mut term), Ok(mut quit)) => {
                tokio::select! {
                    _ = term.recv() => {}
                    _ = quit.recv() => {}
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received");
}
