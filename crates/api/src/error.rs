use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use petstore_core::error::CoreError;

/// Error returned by handlers and services.
///
/// Domain failures arrive as [`CoreError`]; storage failures as raw
/// [`sqlx::Error`] and are classified when the response is built.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed request that never reached the domain layer.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl AppError {
    /// Status, machine code, and client-facing message for this error.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => core_parts(core),
            AppError::Database(err) => sqlx_parts(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.parts();
        (status, Json(ErrorBody { error, code })).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

fn core_parts(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::NotFoundByName { entity, name } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} '{name}' not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Storage errors that a client can act on get a specific status:
///
/// | SQLSTATE | Constraint   | Result |
/// |----------|--------------|--------|
/// | `23505`  | `uq_*`       | 409    |
/// | `23503`  | any          | 409    |
/// | `23514`  | `ck_*`       | 400    |
///
/// `RowNotFound` is 404. Anything else is logged and reported as 500.
fn sqlx_parts(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    let db_err = match err {
        sqlx::Error::RowNotFound => {
            return (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Resource not found".to_string(),
            )
        }
        sqlx::Error::Database(db_err) => db_err,
        other => {
            tracing::error!(error = %other, "Database error");
            return internal();
        }
    };

    let constraint = db_err.constraint().unwrap_or_default();
    match (db_err.code().as_deref(), constraint) {
        (Some("23505"), c) if c.starts_with("uq_") => {
            (StatusCode::CONFLICT, "CONFLICT", unique_message(c))
        }
        (Some("23503"), c) => (StatusCode::CONFLICT, "CONFLICT", reference_message(c)),
        (Some("23514"), c) if c.starts_with("ck_") => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("Value rejected by check {c}"),
        ),
        _ => {
            tracing::error!(error = %db_err, constraint, "Database error");
            internal()
        }
    }
}

fn unique_message(constraint: &str) -> String {
    match constraint {
        "uq_pets_name" => "A pet with this name already exists".to_string(),
        "uq_users_active_username" => "Username is already taken".to_string(),
        "uq_categories_name" => "A category with this name already exists".to_string(),
        "uq_tags_name" => "A tag with this name already exists".to_string(),
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}

fn reference_message(constraint: &str) -> String {
    match constraint {
        "orders_pet_id_fkey" => "Pet is still referenced by orders".to_string(),
        other => format!("Operation violates foreign key constraint: {other}"),
    }
}
