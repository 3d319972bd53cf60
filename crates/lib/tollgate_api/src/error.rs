//! Application error types and HTTP status mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use tollgate_core::auth::AuthError;
use tollgate_core::store::StorageError;

/// Convenience alias for handler return types.
pub type ApiResult<T> = Result<T, ApiError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {action} on {object}")]
    Forbidden { object: String, action: String },

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error")]
    Internal(String),
}

/// Single error entry in a response body.
#[derive(Debug, Serialize)]
pub struct ErrorItem {
    pub message: String,
    #[serde(rename = "isAuthError", skip_serializing_if = "Option::is_none")]
    pub is_auth_error: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// Error response body: `{message, errors: [...]}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub errors: Vec<ErrorItem>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, item) = match &self {
            ApiError::BadRequest(m) => (
                StatusCode::BAD_REQUEST,
                ErrorItem {
                    message: m.clone(),
                    is_auth_error: None,
                    object: None,
                    action: None,
                },
            ),
            ApiError::NotFound(m) => (
                StatusCode::NOT_FOUND,
                ErrorItem {
                    message: m.clone(),
                    is_auth_error: None,
                    object: None,
                    action: None,
                },
            ),
            ApiError::Unauthorized(m) => (
                StatusCode::UNAUTHORIZED,
                ErrorItem {
                    message: m.clone(),
                    is_auth_error: Some(true),
                    object: None,
                    action: None,
                },
            ),
            ApiError::Forbidden { object, action } => (
                StatusCode::FORBIDDEN,
                ErrorItem {
                    message: format!("Action is not permitted: {action} on {object}"),
                    is_auth_error: Some(true),
                    object: Some(object.clone()),
                    action: Some(action.clone()),
                },
            ),
            ApiError::Unavailable(m) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorItem {
                    message: m.clone(),
                    is_auth_error: None,
                    object: None,
                    action: None,
                },
            ),
            // Internal details stay out of the response body.
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorItem {
                    message: "Internal server error".into(),
                    is_auth_error: None,
                    object: None,
                    action: None,
                },
            ),
        };
        let body = Json(ErrorResponse {
            message: item.message.clone(),
            errors: vec![item],
        });
        (status, body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::BadCredentials
            | AuthError::IdentityRequired
            | AuthError::InvalidToken
            | AuthError::ExpiredToken => ApiError::Unauthorized(e.to_string()),
            AuthError::MalformedToken(_) => ApiError::Unauthorized(e.to_string()),
            AuthError::ActionNotPermitted { object, action } => {
                ApiError::Forbidden { object, action }
            }
            AuthError::SecretUnavailable(m) | AuthError::StorageUnavailable(m) => {
                ApiError::Unavailable(m)
            }
            AuthError::MalformedSecret(m) => ApiError::Internal(m),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound => ApiError::NotFound("not found".into()),
            StorageError::Unavailable(m) => ApiError::Unavailable(m),
        }
    }
}
