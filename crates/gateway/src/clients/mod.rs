//! HTTP clients for the backing record stores.
//!
//! Handlers depend on the [`ListingsApi`] and [`UsersApi`] traits so tests
//! can substitute in-memory fakes for the real stores.

mod listings_client;
mod users_client;

pub use listings_client::{ListingsApi, ListingsClient};
pub use users_client::{UsersApi, UsersClient};
