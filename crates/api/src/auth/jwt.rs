//! Session tokens: HS256 JWTs issued on login.
//!
//! The same token goes back in the login body and in the `jwt` cookie.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use petstore_core::types::DbId;

/// Payload of a session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// `users.id` of the holder.
    pub sub: DbId,
    /// Username at login time. Ownership checks on `/user/{username}` compare
    /// against this.
    pub username: String,
    pub exp: i64,
    pub iat: i64,
    /// Random per-token id.
    pub jti: String,
}

/// Signing secret and session lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime of a session token, and of the `jwt` cookie carrying it.
    pub expiry_days: i64,
}

const DEFAULT_EXPIRY_DAYS: i64 = 7;

impl JwtConfig {
    /// Reads `JWT_SECRET` (required, non-empty) and `JWT_EXPIRY_DAYS`
    /// (default 7).
    ///
    /// # Panics
    ///
    /// On a missing or empty secret, or a non-numeric expiry.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.is_empty(), "JWT_SECRET must be set and non-empty");

        let expiry_days = match std::env::var("JWT_EXPIRY_DAYS") {
            Ok(raw) => raw.parse().expect("JWT_EXPIRY_DAYS must be a whole number of days"),
            Err(_) => DEFAULT_EXPIRY_DAYS,
        };

        Self {
            secret,
            expiry_days,
        }
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.secret.as_bytes())
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.secret.as_bytes())
    }
}

/// Token string plus its expiry, which login echoes in `X-Expires-After`.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Sign a session token for `username`, valid for `config.expiry_days`.
pub fn generate_token(
    user_id: DbId,
    username: &str,
    config: &JwtConfig,
) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
    let issued_at = Utc::now();
    let expires_at = issued_at + Duration::days(config.expiry_days);

    let claims = Claims {
        sub: user_id,
        username: username.to_owned(),
        exp: expires_at.timestamp(),
        iat: issued_at.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(&Header::new(Algorithm::HS256), &claims, &config.encoding_key())?;
    Ok(IssuedToken { token, expires_at })
}

/// Check signature and expiry and return the claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(token, &config.decoding_key(), &Validation::new(Algorithm::HS256))
        .map(|data| data.claims)
}
