//! Repository layer - persistence access behind a trait for testability.

pub mod entities;
mod listing_repository;

pub use listing_repository::{ListingRepository, ListingStore};

#[cfg(any(test, feature = "test-utils"))]
pub use listing_repository::MockListingRepository;
