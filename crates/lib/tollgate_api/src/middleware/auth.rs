//! Authentication middleware: `x-auth-token` extraction and verification.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use tracing::debug;

use tollgate_core::models::Identity;

use crate::AppState;
use crate::error::ApiError;

/// Header carrying the signed token on every protected request.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Verified caller identity stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity(pub Identity);

/// Axum middleware: extracts `x-auth-token`, verifies the signature and
/// expiry via the token codec, and injects the decoded [`Identity`] into
/// request extensions. Handlers decide what the identity may do.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(AUTH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized(format!("{AUTH_TOKEN_HEADER} header missing")))?;

    let identity = state.codec.verify(token).await?;
    debug!(subject = %identity.subject, "request authenticated");

    request
        .extensions_mut()
        .insert(AuthenticatedIdentity(identity));

    Ok(next.run(request).await)
}
