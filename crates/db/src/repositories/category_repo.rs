//! Repository for the `categories` table.

use sqlx::PgPool;
use petstore_core::types::DbId;

use crate::models::category::Category;

/// Column list for `categories` queries.
const COLUMNS: &str = "id, name";

/// Lookups and idempotent creation of categories.
pub struct CategoryRepo;

impl CategoryRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Exact-name lookup used by reference resolution.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE name = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every category whose id is in `ids`.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Category>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = ANY($1)");
        sqlx::query_as::<_, Category>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Insert a category or return the existing row with that name.
    ///
    /// Covers the window between resolution and persist where another
    /// request may have created the same name.
    pub async fn create_or_get(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        name: &str,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name) VALUES ($1) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }
}
