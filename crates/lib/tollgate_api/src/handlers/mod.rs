//! Request handlers.

pub mod token;
pub mod users;
