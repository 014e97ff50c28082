//! Prometheus exposition of stored package verdicts
//!
//! Every (record, package) pair becomes one `package_version_info` sample
//! with value 1. The metric is rebuilt from the store on each scrape, so
//! expired records disappear together with their store entries.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use prometheus::{Encoder, GaugeVec, Opts, Registry, TEXT_FORMAT, TextEncoder};
use tracing::error;
use uuid::Uuid;

use crate::http::routes::AppState;
use crate::inventory::PackageRecord;

const PACKAGE_METRIC_NAME: &str = "package_version_info";
const PACKAGE_METRIC_HELP: &str = "Metrics for package versions";
const PACKAGE_METRIC_LABELS: [&str; 8] = [
    "id",
    "package_name",
    "current_version",
    "current_version_eof",
    "newest_version",
    "expired",
    "data_center",
    "host_ip",
];

/// Encode package records in the Prometheus text format
pub fn encode_package_metrics(
    records: &BTreeMap<Uuid, PackageRecord>,
) -> Result<Vec<u8>, prometheus::Error> {
    let registry = Registry::new();
    let gauge = GaugeVec::new(
        Opts::new(PACKAGE_METRIC_NAME, PACKAGE_METRIC_HELP),
        &PACKAGE_METRIC_LABELS,
    )?;
    registry.register(Box::new(gauge.clone()))?;

    for (id, record) in records {
        let id = id.to_string();
        for (package_name, detail) in &record.packages {
            let expired = detail.expired.to_string();
            let labels: [&str; 8] = [
                &id,
                package_name,
                &detail.current_version,
                &detail.current_version_eof,
                &detail.newest_version,
                &expired,
                &record.data_center,
                &record.host_ip,
            ];
            gauge.with_label_values(&labels).set(1.0);
        }
    }

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    Ok(buffer)
}

/// Handler for GET /metrics
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    let records = state
        .aggregator
        .scan()
        .await
        .inspect_err(|e| error!("Failed to scan package versions: {}", e))
        .unwrap_or_default();

    match encode_package_metrics(&records) {
        Ok(buffer) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, TEXT_FORMAT)],
            buffer,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
                .into_response()
        }
    }
}
