//! Version freshness layer
//!
//! This module resolves the latest upstream release and EOL marker for
//! packages, caches that data in the shared store, and decides whether an
//! installed version has fallen behind.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Source    │────▶│    Cache    │◀────│   Checker   │
//! │  (fetch)    │     │  (storage)  │     │  (compare)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       │
//!        ▼                                       ▼
//! ┌─────────────┐                         ┌─────────────┐
//! │   Sources   │                         │  Normalize  │
//! │(endoflife)  │                         │(major.minor)│
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cache`]: Read-through EOL cache with wholesale refresh
//! - [`checker`]: Resolver trait and expiry comparison
//! - [`normalize`]: Version string normalization
//! - [`refresh`]: Fetching the full package universe from a source
//! - [`source`]: Source trait for fetching release cycles
//! - [`sources`]: Concrete source implementations (endoflife.date)
//! - [`error`]: Error types for source and lookup operations
//! - [`types`]: Cache document and release-cycle types

pub mod cache;
pub mod checker;
pub mod error;
pub mod normalize;
pub mod refresh;
pub mod source;
pub mod sources;
pub mod types;
