//! Token grant handlers: login and exchange.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Extension;
use base64::Engine;

use tollgate_core::models::TokenPair;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AuthenticatedIdentity;

/// Header carrying base64-encoded `login:password` credentials.
pub const BASIC_HEADER: &str = "x-auth-basic";

/// `POST /auth/login` — exchange basic credentials for a token pair.
pub async fn login_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<TokenPair>> {
    let (login, password) = decode_basic(&headers)?;
    let pair = state.granter.login(&login, Some(&password)).await?;
    Ok(Json(pair))
}

/// `POST /auth/exchange` — trade a verified exchange token for a fresh
/// pair. The middleware has already decoded the token into an identity;
/// this handler never verifies a token itself.
pub async fn exchange_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedIdentity>,
) -> ApiResult<Json<TokenPair>> {
    let pair = state.granter.exchange(Some(&identity.0)).await?;
    Ok(Json(pair))
}

/// Decode the `x-auth-basic` header into `(login, password)`.
///
/// An empty password is passed through verbatim so it still runs the
/// hash comparison and fails like any other wrong password.
fn decode_basic(headers: &HeaderMap) -> ApiResult<(String, String)> {
    let raw = headers
        .get(BASIC_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized(format!("{BASIC_HEADER} header missing")))?;

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(raw)
        .map_err(|_| ApiError::BadRequest("credentials are not valid base64".into()))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| ApiError::BadRequest("credentials are not valid UTF-8".into()))?;

    let (login, password) = decoded
        .split_once(':')
        .ok_or_else(|| ApiError::BadRequest("credentials must be login:password".into()))?;
    if login.is_empty() {
        return Err(ApiError::BadRequest("login must not be empty".into()));
    }

    Ok((login.to_string(), password.to_string()))
}

/// Encode credentials for the `x-auth-basic` header (client/test helper).
pub fn encode_credentials(login: &str, password: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(format!("{login}:{password}"))
}
