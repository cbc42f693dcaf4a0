//! Repository for the `tags` table and the `pet_tags` association.

use sqlx::PgPool;
use petstore_core::types::DbId;

use crate::models::tag::{PetTag, Tag};

/// Column list for `tags` queries.
const COLUMNS: &str = "id, name";

/// Tag lookups, idempotent creation, and pet/tag association management.
pub struct TagRepo;

impl TagRepo {
    // -----------------------------------------------------------------------
    // Tags
    // -----------------------------------------------------------------------

    /// Exact-name lookup used by reference resolution.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE name = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Insert a tag or return the existing row with that name.
    pub async fn create_or_get(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        name: &str,
    ) -> Result<Tag, sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (name) VALUES ($1) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }

    // -----------------------------------------------------------------------
    // Pet associations
    // -----------------------------------------------------------------------

    /// Tags attached to any of `pet_ids`, ordered by pet then tag name.
    pub async fn list_for_pets(pool: &PgPool, pet_ids: &[DbId]) -> Result<Vec<PetTag>, sqlx::Error> {
        if pet_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, PetTag>(
            "SELECT pt.pet_id, t.id, t.name \
             FROM pet_tags pt \
             JOIN tags t ON t.id = pt.tag_id \
             WHERE pt.pet_id = ANY($1) \
             ORDER BY pt.pet_id, t.name",
        )
        .bind(pet_ids)
        .fetch_all(pool)
        .await
    }

    /// Remove every tag association of a pet. Tag rows themselves stay.
    pub async fn clear_for_pet(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        pet_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pet_tags WHERE pet_id = $1")
            .bind(pet_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    /// Attach tags to a pet (idempotent per pair).
    pub async fn attach_to_pet(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        pet_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        for &tag_id in tag_ids {
            sqlx::query(
                "INSERT INTO pet_tags (pet_id, tag_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(pet_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
