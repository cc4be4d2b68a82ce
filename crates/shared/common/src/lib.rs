//! Common utilities shared across all services.
//!
//! This crate provides:
//! - Unified error handling rendering the `{"result": false, ...}` envelope
//! - Pagination parameter parsing and mirroring

pub mod error;
pub mod pagination;

pub use error::{AppError, AppResult};
pub use pagination::PageParams;
