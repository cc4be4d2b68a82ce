//! HTTP API layer.

mod listing_handler;

pub use listing_handler::{listing_routes, AppState};
