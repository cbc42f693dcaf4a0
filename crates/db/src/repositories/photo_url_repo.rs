//! Repository for the `photo_urls` table.

use sqlx::PgPool;
use petstore_core::types::DbId;

use crate::models::photo_url::PhotoUrl;

/// Column list for `photo_urls` queries.
const COLUMNS: &str = "id, pet_id, url, created_at, updated_at";

/// Photo rows owned by pets.
pub struct PhotoUrlRepo;

impl PhotoUrlRepo {
    /// Photos of any of `pet_ids`, in insertion order per pet.
    pub async fn list_for_pets(
        pool: &PgPool,
        pet_ids: &[DbId],
    ) -> Result<Vec<PhotoUrl>, sqlx::Error> {
        if pet_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM photo_urls \
             WHERE pet_id = ANY($1) \
             ORDER BY pet_id, id"
        );
        sqlx::query_as::<_, PhotoUrl>(&query)
            .bind(pet_ids)
            .fetch_all(pool)
            .await
    }

    /// Delete every photo owned by a pet.
    pub async fn delete_for_pet(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        pet_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM photo_urls WHERE pet_id = $1")
            .bind(pet_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    /// Insert photos for a pet, preserving the order of `urls`.
    pub async fn insert_for_pet(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        pet_id: DbId,
        urls: &[String],
    ) -> Result<(), sqlx::Error> {
        if urls.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO photo_urls (pet_id, url) \
             SELECT $1, u.url FROM UNNEST($2::text[]) WITH ORDINALITY AS u(url, ord) \
             ORDER BY u.ord",
        )
        .bind(pet_id)
        .bind(urls)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
