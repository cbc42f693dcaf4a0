//! Handlers for the `/user` resource (accounts, login, logout).

use axum::extract::{Path, Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderName, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use petstore_core::error::CoreError;
use petstore_core::user::{validate_email, validate_password, validate_phone, validate_username};
use petstore_db::models::user::{User, UserFields, UserPayload, UserResponse};
use petstore_db::repositories::UserRepo;

use crate::auth::cookie::{expired_session_cookie, session_cookie};
use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::LoginParams;
use crate::response::ActionResponse;
use crate::state::AppState;

/// Advertised request allowance per hour, sent on login.
const RATE_LIMIT_PER_HOUR: &str = "50";

const X_EXPIRES_AFTER: &str = "x-expires-after";
const X_RATE_LIMIT: &str = "x-rate-limit";

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Per-user outcome of a bulk create.
#[derive(Debug, Serialize)]
pub struct BulkUserResult {
    pub username: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /user
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> AppResult<(StatusCode, Json<ActionResponse>)> {
    let user = insert_user(&state, payload).await?;
    tracing::info!(user_id = user.id, username = %user.username, "User created");
    Ok((StatusCode::CREATED, Json(ActionResponse::message("User created"))))
}

/// POST /user/createWithArray and POST /user/createWithList
///
/// Each user is created independently; one failure does not stop the rest.
pub async fn create_users(
    State(state): State<AppState>,
    Json(payloads): Json<Vec<UserPayload>>,
) -> AppResult<Json<Vec<BulkUserResult>>> {
    let mut results = Vec::with_capacity(payloads.len());
    for payload in payloads {
        let username = payload.username.clone();
        match insert_user(&state, payload).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, username = %user.username, "User created");
                results.push(BulkUserResult {
                    username,
                    success: true,
                    error: None,
                });
            }
            Err(err) => {
                tracing::debug!(username = %username, error = %err, "Bulk user create failed");
                results.push(BulkUserResult {
                    username,
                    success: false,
                    error: Some(public_message(&err)),
                });
            }
        }
    }
    Ok(Json(results))
}

/// GET /user/login?username=&password=
///
/// Returns the session token as plain text and also sets it as the `jwt`
/// cookie. `X-Expires-After` carries the token expiry (RFC 3339).
pub async fn login(
    State(state): State<AppState>,
    Query(params): Query<LoginParams>,
) -> AppResult<impl IntoResponse> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        ))
    };

    let user = UserRepo::find_by_username(&state.pool, &params.username)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&params.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid());
    }

    let issued = generate_token(user.id, &user.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, username = %user.username, "User logged in");

    Ok((
        [
            (SET_COOKIE, session_cookie(&issued.token, issued.expires_at)),
            (
                HeaderName::from_static(X_EXPIRES_AFTER),
                issued.expires_at.to_rfc3339(),
            ),
            (
                HeaderName::from_static(X_RATE_LIMIT),
                RATE_LIMIT_PER_HOUR.to_string(),
            ),
        ],
        issued.token,
    ))
}

/// GET /user/logout
///
/// Expires the `jwt` cookie. Tokens are stateless, so nothing is revoked
/// server-side.
pub async fn logout() -> impl IntoResponse {
    (
        [(SET_COOKIE, expired_session_cookie())],
        Json(ActionResponse::message("Logged out")),
    )
}

/// GET /user/{username}
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| user_not_found(&username))?;
    Ok(Json(user.into()))
}

/// PUT /user/{username}
///
/// Owner only. Every field is re-validated; the username may change as long
/// as no other active account holds the new one.
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
    Json(payload): Json<UserPayload>,
) -> AppResult<Json<ActionResponse>> {
    auth.require_owner(&username)?;
    validate_user_payload(&payload)?;

    let user = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| user_not_found(&username))?;

    if payload.username != username
        && UserRepo::find_by_username(&state.pool, &payload.username)
            .await?
            .is_some()
    {
        return Err(username_taken(&payload.username));
    }

    let fields = user_fields(payload)?;
    UserRepo::update(&state.pool, user.id, &fields)
        .await?
        .ok_or_else(|| user_not_found(&username))?;

    tracing::info!(user_id = user.id, username = %fields.username, "User updated");
    Ok(Json(ActionResponse::message("User updated")))
}

/// DELETE /user/{username}
///
/// Owner only. Logical delete: the account is flagged and hidden.
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> AppResult<Json<ActionResponse>> {
    auth.require_owner(&username)?;

    if !UserRepo::soft_delete(&state.pool, &username).await? {
        return Err(user_not_found(&username));
    }

    tracing::info!(user_id = auth.user_id, username = %username, "User deleted");
    Ok(Json(ActionResponse::message("User deleted")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate, hash, and insert one user.
async fn insert_user(
    state: &AppState,
    payload: UserPayload,
) -> AppResult<User> {
    validate_user_payload(&payload)?;

    if UserRepo::find_by_username(&state.pool, &payload.username)
        .await?
        .is_some()
    {
        return Err(username_taken(&payload.username));
    }

    let fields = user_fields(payload)?;
    Ok(UserRepo::create(&state.pool, &fields).await?)
}

fn validate_user_payload(payload: &UserPayload) -> Result<(), CoreError> {
    validate_username(&payload.username)?;
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;
    validate_phone(&payload.phone)?;
    Ok(())
}

/// Hash the password and build the repository input.
fn user_fields(payload: UserPayload) -> AppResult<UserFields> {
    let password_hash = hash_password(&payload.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    Ok(UserFields {
        username: payload.username,
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
        password_hash,
        phone: payload.phone,
    })
}

fn user_not_found(username: &str) -> AppError {
    AppError::Core(CoreError::NotFoundByName {
        entity: "User",
        name: username.to_string(),
    })
}

fn username_taken(username: &str) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Username '{username}' is already taken"
    )))
}

/// Message safe to hand back to clients for a failed bulk entry.
fn public_message(err: &AppError) -> String {
    match err {
        AppError::Core(CoreError::Internal(_)) => "An internal error occurred".to_string(),
        AppError::Core(core) => core.to_string(),
        AppError::BadRequest(msg) => msg.clone(),
        AppError::Database(_) | AppError::InternalError(_) => {
            "An internal error occurred".to_string()
        }
    }
}
