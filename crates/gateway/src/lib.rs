//! Aggregation Gateway Library
//!
//! The public-facing service: fans out to the listings and users stores
//! concurrently, joins their pages into the combined listing view, applies
//! the optional `user_id` filter, and validates create requests before
//! proxying them to the owning store. The gateway holds no state of its own.

pub mod clients;
pub mod config;
pub mod handlers;
pub mod join;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use crate::clients::{ListingsClient, UsersClient};
use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the gateway as an embedded component (for combined binary).
pub async fn run_embedded(
    host: &str,
    port: u16,
    listings_store_url: String,
    users_store_url: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = GatewayConfig::from_env();
    config.listings_store_url = listings_store_url;
    config.users_store_url = users_store_url;

    run_server_with_config(host, port, config).await
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: GatewayConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // No request timeout: the upstream contract has none, so a hung store
    // hangs the request.
    let http = reqwest::Client::new();
    let listings = Arc::new(ListingsClient::new(http.clone(), &config.listings_store_url));
    let users = Arc::new(UsersClient::new(http, &config.users_store_url));

    // Create app state
    let state = AppState::new(listings, users, config);

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
