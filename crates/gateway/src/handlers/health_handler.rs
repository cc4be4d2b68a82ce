//! Liveness probe.

use axum::{routing::get, Router};

use crate::state::AppState;

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/ping", get(ping))
}

/// Fixed literal, plain text, no dependencies.
async fn ping() -> &'static str {
    "pong!"
}
