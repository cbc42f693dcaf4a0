use std::fmt::Debug;
use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// Server settings, read once at startup and shared through `AppState`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS. Credentials are allowed, so `*` is not usable.
    pub cors_origins: Vec<String>,
    /// Requests running longer than this are answered with 408.
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after SIGINT/SIGTERM.
    pub shutdown_timeout_secs: u64,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load from the environment.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `8080`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:8080` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    ///
    /// JWT settings come from [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// If a numeric variable does not parse.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 8080),
            cors_origins: parse_origins(&env_or(
                "CORS_ORIGINS",
                "http://localhost:8080".to_string(),
            )),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 30),
            jwt: JwtConfig::from_env(),
        }
    }
}

/// Parse `key` from the environment, or fall back to `default` when unset.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Debug,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e:?}")),
        Err(_) => default,
    }
}

/// Comma-separated origins; blanks are skipped.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
