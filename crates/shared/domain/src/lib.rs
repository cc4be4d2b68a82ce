//! Domain layer - entities and validation primitives.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! All types here are shared between the gateway and the record stores.

pub mod listing;
pub mod time;
pub mod user;
pub mod validation;

pub use listing::{JoinedListing, Listing, ListingType, NewListing};
pub use time::now_micros;
pub use user::{NewUser, User};
pub use validation::ValidationErrors;
