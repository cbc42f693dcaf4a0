//! Repository for the `pets` table and the pet aggregate.
//!
//! Writes that touch more than one table (create, replace, delete) run in a
//! single transaction; the association helpers in [`TagRepo`] and
//! [`PhotoUrlRepo`] are called with that transaction.

use std::collections::HashMap;

use sqlx::PgPool;
use petstore_core::pet::{PetStatus, Reference};
use petstore_core::types::DbId;

use crate::models::category::Category;
use crate::models::pet::{Inventory, NewPet, Pet, PetAggregate, PetReplacement};
use crate::models::tag::Tag;
use crate::repositories::{CategoryRepo, PhotoUrlRepo, TagRepo};

/// Column list for `pets` queries.
const COLUMNS: &str = "id, name, status, category_id, created_at, updated_at";

/// Same columns qualified with the `p` alias for joined queries.
const P_COLUMNS: &str =
    "p.id, p.name, p.status, p.category_id, p.created_at, p.updated_at";

/// Provides CRUD operations for pets and their associations.
pub struct PetRepo;

impl PetRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Find a pet row by ID, without relations.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Pet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pets WHERE id = $1");
        sqlx::query_as::<_, Pet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Existence probe by name. Returns the id of the pet holding `name`.
    pub async fn find_id_by_name(pool: &PgPool, name: &str) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM pets WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Find a pet by ID with category, tags, and photos loaded.
    pub async fn find_aggregate(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PetAggregate>, sqlx::Error> {
        let Some(pet) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let mut loaded = Self::load_relations(pool, vec![pet]).await?;
        Ok(loaded.pop())
    }

    /// Pets in any of `statuses`, grouped by status in the order requested.
    pub async fn list_by_status(
        pool: &PgPool,
        statuses: &[PetStatus],
    ) -> Result<Vec<PetAggregate>, sqlx::Error> {
        if statuses.is_empty() {
            return Ok(Vec::new());
        }
        let names: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();

        let query = format!(
            "SELECT {COLUMNS} FROM pets \
             WHERE status = ANY($1) \
             ORDER BY array_position($1::text[], status), id"
        );
        let pets = sqlx::query_as::<_, Pet>(&query)
            .bind(&names)
            .fetch_all(pool)
            .await?;

        Self::load_relations(pool, pets).await
    }

    /// Pets that carry **every** tag in `tag_names`.
    ///
    /// A pet tagged with only a subset is excluded. Duplicate names count
    /// once; an empty filter matches nothing.
    pub async fn list_by_tags(
        pool: &PgPool,
        tag_names: &[String],
    ) -> Result<Vec<PetAggregate>, sqlx::Error> {
        let mut names: Vec<&str> = Vec::with_capacity(tag_names.len());
        for name in tag_names {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let tag_count = names.len() as i64;

        let query = format!(
            "SELECT {P_COLUMNS} FROM pets p \
             JOIN pet_tags pt ON pt.pet_id = p.id \
             JOIN tags t ON t.id = pt.tag_id \
             WHERE t.name = ANY($1) \
             GROUP BY p.id \
             HAVING COUNT(DISTINCT t.name) = $2 \
             ORDER BY p.id"
        );
        let pets = sqlx::query_as::<_, Pet>(&query)
            .bind(&names)
            .bind(tag_count)
            .fetch_all(pool)
            .await?;

        Self::load_relations(pool, pets).await
    }

    /// Pet counts per status. Statuses with no pets report zero.
    pub async fn inventory(pool: &PgPool) -> Result<Inventory, sqlx::Error> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*) FROM pets GROUP BY status",
        )
        .fetch_all(pool)
        .await?;

        let mut inventory = Inventory::default();
        for (status, count) in rows {
            // The CHECK constraint on `pets.status` keeps this exhaustive.
            if let Ok(status) = status.parse::<PetStatus>() {
                inventory.add(status, count);
            }
        }
        Ok(inventory)
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a pet together with its category, tags, and photos.
    ///
    /// References marked [`Reference::New`] are created (or picked up if a
    /// concurrent request created them first). Returns the new pet's ID.
    pub async fn create(pool: &PgPool, input: &NewPet) -> Result<DbId, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let category_id = match &input.category {
            None => None,
            Some(Reference::Existing(category)) => Some(category.id),
            Some(Reference::New(name)) => Some(CategoryRepo::create_or_get(&mut tx, name).await?.id),
        };

        let pet_id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO pets (name, status, category_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&input.name)
        .bind(input.status.as_str())
        .bind(category_id)
        .fetch_one(&mut *tx)
        .await?;

        PhotoUrlRepo::insert_for_pet(&mut tx, pet_id, &input.photo_urls).await?;

        let tag_ids = Self::persist_tags(&mut tx, &input.tags).await?;
        TagRepo::attach_to_pet(&mut tx, pet_id, &tag_ids).await?;

        tx.commit().await?;
        Ok(pet_id)
    }

    /// Narrow update of the name and status columns only.
    ///
    /// Returns `None` if no pet with the given ID exists.
    pub async fn update_fields(
        pool: &PgPool,
        id: DbId,
        name: &str,
        status: PetStatus,
    ) -> Result<Option<Pet>, sqlx::Error> {
        let query = format!(
            "UPDATE pets SET name = $2, status = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Pet>(&query)
            .bind(id)
            .bind(name)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Transactional replace of a pet aggregate.
    ///
    /// 1. Non-empty `photo_urls`: delete the stored photos, insert the new set.
    /// 2. Non-empty `tags`: clear the associations, attach the resolved set.
    /// 3. Update name, status, and (when given) category id.
    ///
    /// Empty collections leave the stored ones untouched. Any failure rolls
    /// the whole call back. Returns `false` if the pet does not exist.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &PetReplacement,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !input.photo_urls.is_empty() {
            PhotoUrlRepo::delete_for_pet(&mut tx, id).await?;
            PhotoUrlRepo::insert_for_pet(&mut tx, id, &input.photo_urls).await?;
        }

        if !input.tags.is_empty() {
            let tag_ids = Self::persist_tags(&mut tx, &input.tags).await?;
            TagRepo::clear_for_pet(&mut tx, id).await?;
            TagRepo::attach_to_pet(&mut tx, id, &tag_ids).await?;
        }

        let updated = sqlx::query(
            "UPDATE pets SET name = $2, status = $3, category_id = COALESCE($4, category_id) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.status.as_str())
        .bind(input.category_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        tracing::debug!(
            pet_id = id,
            photos_replaced = !input.photo_urls.is_empty(),
            tags_replaced = !input.tags.is_empty(),
            tags_created = input.tags.iter().filter(|t| t.is_new()).count(),
            "Pet aggregate replaced"
        );
        Ok(true)
    }

    /// Delete a pet: clear tag associations, delete photos, delete the row.
    ///
    /// All three steps share one transaction. Returns `true` if a pet was
    /// deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let tags_cleared = TagRepo::clear_for_pet(&mut tx, id).await?;
        let photos_deleted = PhotoUrlRepo::delete_for_pet(&mut tx, id).await?;

        let result = sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        tracing::debug!(pet_id = id, tags_cleared, photos_deleted, "Pet row deleted");
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Turn resolved tag references into tag IDs, creating new tags.
    ///
    /// Duplicates collapse to their first occurrence.
    async fn persist_tags(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        tags: &[Reference<Tag>],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let mut ids = Vec::with_capacity(tags.len());
        for tag in tags {
            let id = match tag {
                Reference::Existing(tag) => tag.id,
                Reference::New(name) => TagRepo::create_or_get(tx, name).await?.id,
            };
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    /// Eager-load category, tags, and photos for a batch of pets.
    ///
    /// Three queries regardless of batch size. Output order follows `pets`.
    async fn load_relations(
        pool: &PgPool,
        pets: Vec<Pet>,
    ) -> Result<Vec<PetAggregate>, sqlx::Error> {
        if pets.is_empty() {
            return Ok(Vec::new());
        }

        let pet_ids: Vec<DbId> = pets.iter().map(|p| p.id).collect();
        let mut category_ids: Vec<DbId> = pets.iter().filter_map(|p| p.category_id).collect();
        category_ids.sort_unstable();
        category_ids.dedup();

        let categories: HashMap<DbId, Category> = CategoryRepo::find_by_ids(pool, &category_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let mut tags: HashMap<DbId, Vec<Tag>> = HashMap::new();
        for row in TagRepo::list_for_pets(pool, &pet_ids).await? {
            tags.entry(row.pet_id).or_default().push(row.into());
        }

        let mut photos: HashMap<DbId, Vec<String>> = HashMap::new();
        for photo in PhotoUrlRepo::list_for_pets(pool, &pet_ids).await? {
            photos.entry(photo.pet_id).or_default().push(photo.url);
        }

        Ok(pets
            .into_iter()
            .map(|pet| PetAggregate {
                category: pet.category_id.and_then(|cid| categories.get(&cid).cloned()),
                tags: tags.remove(&pet.id).unwrap_or_default(),
                photo_urls: photos.remove(&pet.id).unwrap_or_default(),
                id: pet.id,
                name: pet.name,
                status: pet.status,
            })
            .collect())
    }
}
