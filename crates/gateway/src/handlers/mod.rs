//! Public API handlers.

mod health_handler;
mod listing_handler;
mod user_handler;

pub use health_handler::health_routes;
pub use listing_handler::listing_routes;
pub use user_handler::user_routes;
