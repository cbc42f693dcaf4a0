//! The `jwt` session cookie.
//!
//! Built and parsed by hand on top of the raw `Cookie` / `Set-Cookie`
//! headers; only one cookie is ever set.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use chrono::{DateTime, Utc};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "jwt";

/// `Set-Cookie` value carrying a session token until `expires_at`.
pub fn session_cookie(token: &str, expires_at: DateTime<Utc>) -> String {
    let max_age = (expires_at - Utc::now()).num_seconds().max(0);
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}; Expires={}",
        expires_at.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}

/// `Set-Cookie` value that makes the browser drop the session cookie.
pub fn expired_session_cookie() -> String {
    format!(
        "{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0; \
         Expires=Thu, 01 Jan 1970 00:00:00 GMT"
    )
}

/// Value of the named cookie from the request's `Cookie` headers.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}
