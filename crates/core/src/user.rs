//! User account field rules and status flags.
//!
//! Users are never physically deleted; `user_status` flips to
//! [`USER_STATUS_DELETED`] and every lookup filters on [`USER_STATUS_ACTIVE`].

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidateEmail;

use crate::error::CoreError;

/// `users.user_status` value for a live account.
pub const USER_STATUS_ACTIVE: i32 = 0;

/// `users.user_status` value for a logically deleted account.
pub const USER_STATUS_DELETED: i32 = 1;

/// Minimum password length in characters.
pub const MIN_PASSWORD_LEN: usize = 5;

/// Maximum password length in characters.
pub const MAX_PASSWORD_LEN: usize = 16;

/// Characters a password may be built from.
pub const PASSWORD_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz-.@!$&";

/// E.164: a plus sign, a non-zero leading digit, at most 15 digits total.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").expect("valid regex"));

pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if username.trim().is_empty() {
        return Err(CoreError::Validation("username must not be empty".into()));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !email.validate_email() {
        return Err(CoreError::Validation(format!("invalid email address: {email}")));
    }
    Ok(())
}

/// Length between [`MIN_PASSWORD_LEN`] and [`MAX_PASSWORD_LEN`], characters
/// drawn from [`PASSWORD_ALPHABET`] only.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation("password is too short".into()));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(CoreError::Validation("password is too long".into()));
    }
    if !password.chars().all(|c| PASSWORD_ALPHABET.contains(c)) {
        return Err(CoreError::Validation(
            "password contains invalid characters".into(),
        ));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    if !PHONE_RE.is_match(phone) {
        return Err(CoreError::Validation("invalid phone number".into()));
    }
    Ok(())
}
