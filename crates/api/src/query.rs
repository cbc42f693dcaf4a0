//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Raw query pairs, for parameters that may repeat (`?status=a&status=b`).
pub type QueryPairs = Vec<(String, String)>;

/// Every value given for `key`, in request order.
pub fn values_of(pairs: &[(String, String)], key: &str) -> Vec<String> {
    pairs
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
        .collect()
}

/// Query parameters for `GET /user/login`.
#[derive(Debug, Deserialize)]
pub struct LoginParams {
    pub username: String,
    pub password: String,
}
