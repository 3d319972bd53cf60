//! # tollgate_core
//!
//! Core domain logic for Tollgate: token-based authentication and
//! authorization over externally stored user records, role definitions
//! and signing secrets.

pub mod auth;
pub mod migrate;
pub mod models;
pub mod store;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
