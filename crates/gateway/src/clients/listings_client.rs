//! HTTP client for the listings store.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use common::{AppError, AppResult, PageParams};
use domain::Listing;

/// Read/write operations the gateway needs from the listings store.
#[async_trait]
pub trait ListingsApi: Send + Sync {
    /// Fetch one page of listings, mirroring the caller's pagination.
    async fn list_listings(&self, page: PageParams) -> AppResult<Vec<Listing>>;

    /// Forward a raw create payload to the store.
    async fn create_listing(&self, payload: Value) -> AppResult<()>;
}

/// Expected shape of the store's list response; anything else is a contract
/// violation surfaced as `service error`.
#[derive(Debug, Deserialize)]
struct ListingsEnvelope {
    listings: Vec<Listing>,
}

/// HTTP client wrapper for the listings store.
pub struct ListingsClient {
    http: reqwest::Client,
    base_url: String,
}

impl ListingsClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ListingsApi for ListingsClient {
    async fn list_listings(&self, page: PageParams) -> AppResult<Vec<Listing>> {
        let url = format!("{}/listings", self.base_url);
        debug!("Fetching listings page from {}", url);

        let response = self
            .http
            .get(&url)
            .query(&page.query_pairs())
            .send()
            .await
            .map_err(AppError::from)?;

        let envelope: ListingsEnvelope = response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("listings payload: {}", e)))?;

        Ok(envelope.listings)
    }

    async fn create_listing(&self, payload: Value) -> AppResult<()> {
        let url = format!("{}/listings", self.base_url);
        self.http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
