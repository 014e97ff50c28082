//! Shared test utilities

mod app;
mod source;

pub use app::*;
pub use source::*;
