//! Users store configuration.

use std::env;

/// Users store configuration.
#[derive(Debug, Clone)]
pub struct UsersStoreConfig {
    /// Database connection URL
    pub database_url: String,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl UsersStoreConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("USERS_STORE_DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://users.db?mode=rwc".to_string()),
            host: env::var("USERS_STORE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("USERS_STORE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(6524),
        }
    }
}

impl Default for UsersStoreConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://users.db?mode=rwc".to_string(),
            host: "0.0.0.0".to_string(),
            port: 6524,
        }
    }
}
