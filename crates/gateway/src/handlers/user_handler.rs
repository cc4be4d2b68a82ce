//! User creation.

use axum::{body::Bytes, extract::State, response::Json, routing::post, Router};
use serde_json::Value;
use tracing::warn;

use common::{AppError, AppResult};
use domain::validation::validate_user;

use crate::state::AppState;

/// Create user routes.
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/", post(create_user))
}

/// Validate a create payload, forward the raw body to the users store
/// without waiting for it, and echo the payload back.
async fn create_user(State(state): State<AppState>, body: Bytes) -> AppResult<Json<Value>> {
    let payload: Value =
        serde_json::from_slice(&body).map_err(|_| AppError::bad_request("invalid json body"))?;
    validate_user(&payload)?;

    let client = state.users.clone();
    let forwarded = payload.clone();
    tokio::spawn(async move {
        if let Err(e) = client.create_user(forwarded).await {
            warn!("Failed to forward user create to store: {}", e);
        }
    });

    Ok(Json(payload))
}
