//! Shared domain types for the balance backend.
//!
//! Everything here is dependency-light so it can be used from the db,
//! cloud, bank, and api crates alike.

pub mod error;
pub mod naming;
pub mod types;
