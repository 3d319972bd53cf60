//! Domain models.

pub mod auth;
pub mod user;

pub use auth::{AccessDetails, Identity, RoleTable, Secret, TokenClaims, TokenPair};
pub use user::UserRecord;
