//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a session token.

pub mod auth;
