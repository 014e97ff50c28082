pub mod config;
pub mod http;
pub mod inventory;
pub mod store;
pub mod version;
