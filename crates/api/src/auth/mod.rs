//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT session-token generation and validation.
//! - [`cookie`] -- the `jwt` session cookie.

pub mod cookie;
pub mod jwt;
pub mod password;
