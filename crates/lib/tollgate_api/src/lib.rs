//! # tollgate_api
//!
//! HTTP API library for Tollgate: token grant endpoints plus user-record
//! CRUD behind token authorization.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, patch, post, put};
use tower_http::cors::{Any, CorsLayer};

use tollgate_core::auth::grant::Granter;
use tollgate_core::auth::password::PasswordHasher;
use tollgate_core::auth::token::TokenCodec;
use tollgate_core::store::UserStore;

use crate::config::ApiConfig;
use crate::handlers::{token, users};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// User-record storage.
    pub users: Arc<dyn UserStore>,
    /// Token-granting flows.
    pub granter: Arc<Granter>,
    /// Token verification for the auth middleware.
    pub codec: TokenCodec,
    /// Password hashing for user writes.
    pub hasher: PasswordHasher,
    /// API configuration.
    pub config: ApiConfig,
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Login needs no token; exchange and user CRUD require a verified one.
    let public = Router::new().route("/auth/login", post(token::login_handler));

    let protected = Router::new()
        .route("/auth/exchange", post(token::exchange_handler))
        .route("/users", post(users::create_handler))
        .route("/users/{login}", get(users::read_handler))
        .route("/users/{login}", put(users::replace_handler))
        .route("/users/{login}", patch(users::update_handler))
        .route("/users/{login}", delete(users::delete_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .with_state(state)
}
