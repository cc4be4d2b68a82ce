//! Database entities for SeaORM.

pub mod user;
