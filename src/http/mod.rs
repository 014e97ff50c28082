//! HTTP layer
//!
//! Exposes package submission and retrieval, a health check and the
//! Prometheus exporter over HTTP.
//!
//! # Modules
//!
//! - [`auth`]: Shared-token check for protected routes
//! - [`metrics`]: `package_version_info` exposition
//! - [`routes`]: Router, handlers and wire documents
//! - [`server`]: Server initialization and lifecycle

pub mod auth;
pub mod metrics;
pub mod routes;
pub mod server;
