//! Database entities for SeaORM.

pub mod listing;
