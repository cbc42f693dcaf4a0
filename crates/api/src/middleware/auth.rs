//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use petstore_core::error::CoreError;
use petstore_core::types::DbId;

use crate::auth::cookie::{cookie_value, SESSION_COOKIE};
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Header some clients use instead of `Authorization`.
const API_KEY_HEADER: &str = "api_key";

/// Authenticated user extracted from a session token.
///
/// The token is taken from the first of these that is present:
/// `Authorization: Bearer <token>`, a bare `Authorization: <token>`,
/// the `api_key` header, or the `jwt` cookie.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, username = %user.username, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub username: String,
}

impl AuthUser {
    /// Reject with 403 unless this user owns the `username` account.
    pub fn require_owner(&self, username: &str) -> Result<(), AppError> {
        if self.username != username {
            return Err(AppError::Core(CoreError::Forbidden(
                "You can only modify your own account".into(),
            )));
        }
        Ok(())
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing authentication token".into()))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            username: claims.username,
        })
    }
}

/// Locate the session token in the request headers.
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(value) = header(AUTHORIZATION.as_str()) {
        return Some(value.strip_prefix("Bearer ").unwrap_or(value).trim());
    }
    header(API_KEY_HEADER).or_else(|| cookie_value(headers, SESSION_COOKIE))
}
