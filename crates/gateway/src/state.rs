//! Application state for dependency injection.

use std::sync::Arc;

use crate::clients::{ListingsApi, UsersApi};
use crate::config::GatewayConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub listings: Arc<dyn ListingsApi>,
    pub users: Arc<dyn UsersApi>,
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        listings: Arc<dyn ListingsApi>,
        users: Arc<dyn UsersApi>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            listings,
            users,
            config,
        }
    }
}
