//! Repository for the `users` table.
//!
//! Users are soft-deleted: every lookup filters on `user_status = 0`.

use sqlx::PgPool;
use petstore_core::types::DbId;
use petstore_core::user::{USER_STATUS_ACTIVE, USER_STATUS_DELETED};

use crate::models::user::{User, UserFields};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, first_name, last_name, email, password_hash, phone, \
                        user_status, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new active user, returning the created row.
    pub async fn create(pool: &PgPool, input: &UserFields) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, first_name, last_name, email, password_hash, phone)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find an active user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1 AND user_status = $2");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .bind(USER_STATUS_ACTIVE)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite every editable field of an active user.
    ///
    /// Returns `None` if no active row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UserFields,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                username = $2,
                first_name = $3,
                last_name = $4,
                email = $5,
                password_hash = $6,
                phone = $7
             WHERE id = $1 AND user_status = $8
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.phone)
            .bind(USER_STATUS_ACTIVE)
            .fetch_optional(pool)
            .await
    }

    /// Logically delete an active user by username.
    ///
    /// Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET user_status = $2 WHERE username = $1 AND user_status = $3",
        )
        .bind(username)
        .bind(USER_STATUS_DELETED)
        .bind(USER_STATUS_ACTIVE)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
