use crate::types::DbId;

/// Domain failures shared by every crate in the workspace.
///
/// The API layer maps each variant to one HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: DbId },

    /// Lookup by natural key (usernames).
    #[error("{entity} '{name}' does not exist")]
    NotFoundByName { entity: &'static str, name: String },

    /// Input rejected before touching storage.
    #[error("{0}")]
    Validation(String),

    /// Uniqueness or reference rule broken (duplicate pet name, taken username).
    #[error("{0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
