//! Listings store configuration.

use std::env;

/// Listings store configuration.
#[derive(Debug, Clone)]
pub struct ListingsStoreConfig {
    /// Database connection URL
    pub database_url: String,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl ListingsStoreConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("LISTINGS_STORE_DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://listings.db?mode=rwc".to_string()),
            host: env::var("LISTINGS_STORE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("LISTINGS_STORE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(6555),
        }
    }
}

impl Default for ListingsStoreConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://listings.db?mode=rwc".to_string(),
            host: "0.0.0.0".to_string(),
            port: 6555,
        }
    }
}
