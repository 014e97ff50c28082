//! Application test utilities

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use tempfile::TempDir;

use keepup::config::EOL_CACHE_KEY;
use keepup::http::auth::{API_TOKEN_HEADER, ApiToken};
use keepup::http::routes::{AppState, router};
use keepup::inventory::InventoryAggregator;
use keepup::store::{KeyValueStore, SqliteStore};
use keepup::version::cache::EolCache;
use keepup::version::types::{EndOfLifeEntry, EolCacheDocument};

use super::source::MockSource;

pub const TEST_TOKEN: &str = "test-token";

/// Everything a test needs to drive the service end to end
pub struct TestApp {
    _temp_dir: TempDir,
    pub store: Arc<SqliteStore>,
    pub source: Arc<MockSource>,
    pub cache: Arc<EolCache<SqliteStore>>,
    pub router: Router,
}

/// Create a service backed by a temp-dir store and the given source
pub fn create_test_app(source: MockSource) -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(SqliteStore::new(&temp_dir.path().join("test.db")).unwrap());
    let source = Arc::new(source);
    let cache = Arc::new(EolCache::new(store.clone(), source.clone()));
    let aggregator = Arc::new(InventoryAggregator::new(store.clone(), cache.clone()));
    let router = router(
        AppState::new(aggregator, Duration::from_secs(3600)),
        ApiToken::new(TEST_TOKEN),
    );

    TestApp {
        _temp_dir: temp_dir,
        store,
        source,
        cache,
        router,
    }
}

/// Write an EOL cache document directly into the store
pub fn seed_eol_cache(store: &SqliteStore, packages: Vec<(&str, Vec<EndOfLifeEntry>)>) {
    let document = EolCacheDocument {
        package: packages
            .into_iter()
            .map(|(name, entries)| (name.to_string(), entries))
            .collect(),
    };
    store
        .set(
            EOL_CACHE_KEY,
            &serde_json::to_string(&document).unwrap(),
            Duration::from_secs(3600),
        )
        .unwrap();
}

/// Build an authenticated request with a JSON body
pub fn json_request(method: Method, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(API_TOKEN_HEADER, TEST_TOKEN)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body as JSON
pub async fn body_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Read a response body as text
pub async fn body_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}
