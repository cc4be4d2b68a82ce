//! Route configuration.

use axum::Router;

use crate::handlers::{health_routes, listing_routes, user_routes};
use crate::state::AppState;

/// Create the main router with all public routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest(
            "/public-api",
            Router::new()
                .merge(health_routes())
                .nest("/listings", listing_routes())
                .nest("/users", user_routes()),
        )
        .with_state(state)
}
