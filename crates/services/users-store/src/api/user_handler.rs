//! User handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use common::{AppError, AppResult, PageParams};
use domain::validation::validate_user;

use crate::repository::UserRepository;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn UserRepository>,
}

/// Raw pagination query values; parsing is done by hand so failures carry
/// the canonical error messages.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    page_num: Option<String>,
    page_size: Option<String>,
}

/// Create user routes.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/ping", get(ping))
        .route("/users/:id", get(get_user))
}

async fn ping() -> &'static str {
    "pong!"
}

async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Value>> {
    let page = PageParams::parse(query.page_num.as_deref(), query.page_size.as_deref())?;
    let users = state.repo.list(page).await?;
    Ok(Json(json!({"result": true, "users": users})))
}

async fn get_user(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Value>> {
    let user = state.repo.find_by_id(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(json!({"result": true, "user": user})))
}

async fn create_user(State(state): State<AppState>, body: Bytes) -> AppResult<Json<Value>> {
    let payload: Value =
        serde_json::from_slice(&body).map_err(|_| AppError::bad_request("invalid json body"))?;
    let new = validate_user(&payload)?;
    let user = state.repo.create(new).await?;
    Ok(Json(json!({"result": true, "user": user})))
}
