//! HTTP client for the users store.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use common::{AppError, AppResult, PageParams};
use domain::User;

/// Read/write operations the gateway needs from the users store.
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Fetch one page of users, mirroring the caller's pagination.
    async fn list_users(&self, page: PageParams) -> AppResult<Vec<User>>;

    /// Forward a raw create payload to the store.
    async fn create_user(&self, payload: Value) -> AppResult<()>;
}

/// Expected shape of the store's list response; anything else is a contract
/// violation surfaced as `service error`.
#[derive(Debug, Deserialize)]
struct UsersEnvelope {
    users: Vec<User>,
}

/// HTTP client wrapper for the users store.
pub struct UsersClient {
    http: reqwest::Client,
    base_url: String,
}

impl UsersClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl UsersApi for UsersClient {
    async fn list_users(&self, page: PageParams) -> AppResult<Vec<User>> {
        let url = format!("{}/users", self.base_url);
        debug!("Fetching users page from {}", url);

        let response = self
            .http
            .get(&url)
            .query(&page.query_pairs())
            .send()
            .await
            .map_err(AppError::from)?;

        let envelope: UsersEnvelope = response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("users payload: {}", e)))?;

        Ok(envelope.users)
    }

    async fn create_user(&self, payload: Value) -> AppResult<()> {
        let url = format!("{}/users", self.base_url);
        self.http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
