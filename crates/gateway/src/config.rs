//! Gateway configuration.

use std::env;

use crate::join::{FilterMissPolicy, JoinStrategy};

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Listings store base URL
    pub listings_store_url: String,
    /// Users store base URL
    pub users_store_url: String,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// How listings are matched to users (index-compatible or keyed)
    pub join_strategy: JoinStrategy,
    /// What a positional filter miss yields (empty list or 400)
    pub filter_miss: FilterMissPolicy,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            listings_store_url: env::var("LISTINGS_STORE_URL")
                .unwrap_or_else(|_| "http://localhost:6555".to_string()),
            users_store_url: env::var("USERS_STORE_URL")
                .unwrap_or_else(|_| "http://localhost:6524".to_string()),
            host: env::var("GATEWAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("GATEWAY_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(6000),
            join_strategy: env::var("GATEWAY_JOIN_STRATEGY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            filter_miss: env::var("GATEWAY_ON_FILTER_MISS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listings_store_url: "http://localhost:6555".to_string(),
            users_store_url: "http://localhost:6524".to_string(),
            host: "0.0.0.0".to_string(),
            port: 6000,
            join_strategy: JoinStrategy::default(),
            filter_miss: FilterMissPolicy::default(),
        }
    }
}
