//! Combined listing view and listing creation.

use axum::{
    body::Bytes,
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use common::{AppError, AppResult, PageParams};
use domain::validation::validate_listing;

use crate::join::{filter_by_position, join_page};
use crate::state::AppState;

/// Raw query values for the combined view; parsing is done by hand so
/// failures carry the canonical error messages.
#[derive(Debug, Deserialize)]
pub struct ListingsQuery {
    page_num: Option<String>,
    page_size: Option<String>,
    user_id: Option<String>,
}

/// Create listing routes.
pub fn listing_routes() -> Router<AppState> {
    Router::new().route("/", get(get_listings).post(create_listing))
}

/// The combined listing view: fetch both stores concurrently, join, filter.
async fn get_listings(
    State(state): State<AppState>,
    Query(query): Query<ListingsQuery>,
) -> AppResult<Json<Value>> {
    let page = PageParams::parse(query.page_num.as_deref(), query.page_size.as_deref())?;
    let user_id_filter = parse_user_id_filter(query.user_id.as_deref())?;

    // Fire both upstream fetches, then await both; either failure fails the
    // whole request and nothing is retried.
    let (listings, users) = tokio::try_join!(
        state.listings.list_listings(page),
        state.users.list_users(page),
    )?;

    let joined = join_page(listings, users, state.config.join_strategy)?;
    let listings = match user_id_filter {
        Some(user_id) => filter_by_position(joined, user_id, state.config.filter_miss)?,
        None => joined,
    };

    Ok(Json(json!({"result": true, "listings": listings})))
}

/// Validate a create payload, forward the raw body to the listings store
/// without waiting for it, and echo the payload back.
async fn create_listing(State(state): State<AppState>, body: Bytes) -> AppResult<Json<Value>> {
    let payload: Value =
        serde_json::from_slice(&body).map_err(|_| AppError::bad_request("invalid json body"))?;
    validate_listing(&payload)?;

    let client = state.listings.clone();
    let forwarded = payload.clone();
    tokio::spawn(async move {
        if let Err(e) = client.create_listing(forwarded).await {
            warn!("Failed to forward listing create to store: {}", e);
        }
    });

    Ok(Json(payload))
}

fn parse_user_id_filter(raw: Option<&str>) -> AppResult<Option<i64>> {
    match raw {
        None => Ok(None),
        Some(raw) => match raw.parse::<i64>() {
            Ok(user_id) if user_id >= 0 => Ok(Some(user_id)),
            _ => Err(AppError::bad_request("invalid user_id")),
        },
    }
}
