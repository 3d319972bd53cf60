//! User-record CRUD handlers.
//!
//! Every handler checks access before touching the store: a caller
//! granted `"self"` on `users` may operate on their own record, anyone
//! else needs a role grant matching the operation. Stored password
//! hashes never appear in responses.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use tracing::info;

use tollgate_core::auth::access::{AccessPolicy, authenticate};
use tollgate_core::models::{Identity, UserRecord};

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AuthenticatedIdentity;

/// Access object covering user records.
const ACCESS_OBJECT: &str = "users";

/// Incoming user payload for create/replace/update.
#[derive(Debug, Deserialize)]
pub struct UserBody {
    pub login: Option<String>,
    /// Plaintext; hashed before storage.
    pub password: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub person: Option<String>,
    pub roles: Option<Vec<String>>,
}

fn check(identity: &Identity, operation: &str, target_login: &str) -> ApiResult<()> {
    let is_self = |id: &Identity| id.subject == target_login;
    authenticate(
        identity,
        ACCESS_OBJECT,
        operation,
        AccessPolicy::SelfOrRole(&is_self),
    )
    .map_err(ApiError::from)
}

/// `GET /users/{login}` — read a record.
pub async fn read_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedIdentity>,
    Path(login): Path<String>,
) -> ApiResult<Json<UserRecord>> {
    check(&identity.0, "read", &login)?;

    let record = state
        .users
        .get_user(&login)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user '{login}' not found")))?;
    Ok(Json(record))
}

/// `POST /users` — create a record. The login comes from the body.
pub async fn create_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedIdentity>,
    Json(body): Json<UserBody>,
) -> ApiResult<(StatusCode, Json<UserRecord>)> {
    let login = body
        .login
        .clone()
        .ok_or_else(|| ApiError::BadRequest("login is required".into()))?;
    check(&identity.0, "create", &login)?;

    let record = build_record(&state, login, body, None).await?;
    let stored = state.users.put_user(&record).await?;
    info!(login = %stored.login, "user record created");
    Ok((StatusCode::CREATED, Json(stored)))
}

/// `PUT /users/{login}` — replace a record.
///
/// When the body carries no password the previously stored hash is kept,
/// so a replace cannot silently lock the user out.
pub async fn replace_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedIdentity>,
    Path(login): Path<String>,
    Json(body): Json<UserBody>,
) -> ApiResult<(StatusCode, Json<UserRecord>)> {
    check(&identity.0, "replace", &login)?;

    let existing = state.users.get_user(&login).await?;
    let previous_hash = existing.and_then(|r| r.password);

    let record = build_record(&state, login, body, previous_hash).await?;
    let stored = state.users.put_user(&record).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// `PATCH /users/{login}` — update the provided fields only.
pub async fn update_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedIdentity>,
    Path(login): Path<String>,
    Json(body): Json<UserBody>,
) -> ApiResult<Json<UserRecord>> {
    check(&identity.0, "update", &login)?;

    let mut record = state
        .users
        .get_user(&login)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user '{login}' not found")))?;

    if let Some(password) = body.password.as_deref() {
        record.password = Some(state.hasher.hash(password).await?);
    }
    if let Some(name) = body.name {
        record.name = Some(name);
    }
    if let Some(email) = body.email {
        record.email = Some(email);
    }
    if let Some(person) = body.person {
        record.person = Some(person);
    }
    if let Some(roles) = body.roles {
        record.roles = roles;
    }

    let stored = state.users.put_user(&record).await?;
    Ok(Json(stored))
}

/// `DELETE /users/{login}` — delete a record.
pub async fn delete_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedIdentity>,
    Path(login): Path<String>,
) -> ApiResult<StatusCode> {
    check(&identity.0, "delete", &login)?;

    state.users.delete_user(&login).await?;
    info!(login = %login, "user record deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Assemble a full record from a body, hashing any supplied password.
async fn build_record(
    state: &AppState,
    login: String,
    body: UserBody,
    fallback_hash: Option<String>,
) -> ApiResult<UserRecord> {
    let password = match body.password.as_deref() {
        Some(plaintext) => Some(state.hasher.hash(plaintext).await?),
        None => fallback_hash,
    };
    Ok(UserRecord {
        login,
        password,
        name: body.name,
        email: body.email,
        person: body.person,
        roles: body.roles.unwrap_or_default(),
    })
}
