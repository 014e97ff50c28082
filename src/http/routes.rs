//! HTTP routes for package inventories

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router, middleware};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

use crate::http::auth::{ApiToken, require_api_token};
use crate::http::metrics::metrics_handler;
use crate::inventory::{InventoryAggregator, InventoryError, PackageDetail, PackageInventory};

/// Body of a package submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionDocument {
    pub packages: HashMap<String, String>,
}

/// Body carrying a record identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdDocument {
    pub id: Uuid,
}

/// Body of a record retrieval response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseDocument {
    pub id: Uuid,
    pub packages: BTreeMap<String, PackageDetail>,
}

/// Shared state of the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<InventoryAggregator>,
    /// Lifetime of records written by submissions
    pub record_ttl: Duration,
}

impl AppState {
    pub fn new(aggregator: Arc<InventoryAggregator>, record_ttl: Duration) -> Self {
        Self {
            aggregator,
            record_ttl,
        }
    }
}

/// Build the application router.
///
/// `/package-version` requires the API token; `/healthcheck` and `/metrics`
/// are public.
pub fn router(state: AppState, token: ApiToken) -> Router {
    let protected = Router::new()
        .route(
            "/package-version",
            get(get_package_version).put(put_package_version),
        )
        .route_layer(middleware::from_fn_with_state(token, require_api_token));

    Router::new()
        .route("/healthcheck", get(healthcheck))
        .route("/metrics", get(metrics_handler))
        .merge(protected)
        .with_state(state)
}

async fn healthcheck() -> &'static str {
    "OK"
}

async fn put_package_version(State(state): State<AppState>, body: Bytes) -> Response {
    let request: SubmissionDocument = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Invalid package submission: {}", e);
            return (StatusCode::BAD_REQUEST, "Invalid request payload").into_response();
        }
    };

    let inventory = PackageInventory::from_fields(request.packages);

    match state.aggregator.insert(inventory, state.record_ttl).await {
        Ok(id) => Json(IdDocument { id }).into_response(),
        Err(e) => {
            error!("Failed to insert packages: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to insert package data",
            )
                .into_response()
        }
    }
}

async fn get_package_version(State(state): State<AppState>, body: Bytes) -> Response {
    let request: IdDocument = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    match state.aggregator.retrieve(request.id).await {
        Ok(record) => Json(ResponseDocument {
            id: record.id,
            packages: record.packages,
        })
        .into_response(),
        Err(InventoryError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, "Packages data not found").into_response()
        }
        Err(e) => {
            error!("Failed to retrieve packages {}: {}", request.id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve packages data",
            )
                .into_response()
        }
    }
}
