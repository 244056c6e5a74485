//! Gadget Server - Axum host for the catalog page and dataset document.

pub mod config;
pub mod query;
pub mod routes;
pub mod state;

pub use config::Config;
pub use query::CatalogQuery;
pub use state::AppState;
