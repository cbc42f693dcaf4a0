//! Pet aggregate service.
//!
//! Orchestrates validation, name-uniqueness checks, and reference
//! resolution, then hands the prepared aggregate to a [`PetStore`]. All
//! checks run before the first write, so a rejected request leaves no trace.

use petstore_core::error::CoreError;
use petstore_core::pet::{
    is_name_conflict, parse_status_filter, photo_url_path, validate_pet_name,
    validate_photo_urls, validate_reference_name, PetStatus, Reference,
};
use petstore_core::types::DbId;
use petstore_db::models::pet::{NewPet, PetAggregate, PetPayload, PetReplacement};

use crate::error::{AppError, AppResult};
use crate::services::pet_store::PetStore;
use crate::services::resolver::{resolve_category, resolve_tags};

// ---------------------------------------------------------------------------
// Typed inputs
// ---------------------------------------------------------------------------

/// Category as requested by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryInput {
    /// Refer to a stored category by id.
    Id(DbId),
    /// Refer to a category by name, creating it if needed.
    Name(String),
}

/// Validated body of a create or replace request.
#[derive(Debug, Clone)]
pub struct PetInput {
    pub name: String,
    pub status: PetStatus,
    pub category: Option<CategoryInput>,
    pub tag_names: Vec<String>,
    pub photo_urls: Vec<String>,
}

impl TryFrom<PetPayload> for PetInput {
    type Error = CoreError;

    fn try_from(payload: PetPayload) -> Result<Self, Self::Error> {
        validate_pet_name(&payload.name)?;
        let status: PetStatus = payload.status.parse()?;
        validate_photo_urls(&payload.photo_urls)?;

        let category = match payload.category {
            None => None,
            Some(c) if !c.name.trim().is_empty() => Some(CategoryInput::Name(c.name)),
            Some(c) => match c.id {
                Some(id) => Some(CategoryInput::Id(id)),
                None => {
                    return Err(CoreError::Validation(
                        "category needs an id or a name".into(),
                    ))
                }
            },
        };

        let mut tag_names = Vec::with_capacity(payload.tags.len());
        for tag in payload.tags {
            validate_reference_name("Tag", &tag.name)?;
            tag_names.push(tag.name);
        }

        Ok(Self {
            name: payload.name,
            status,
            category,
            tag_names,
            photo_urls: payload.photo_urls,
        })
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Pet aggregate operations over a [`PetStore`].
pub struct PetService<S> {
    store: S,
}

impl<S: PetStore> PetService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub async fn get_pet(&self, id: DbId) -> AppResult<PetAggregate> {
        self.load(id).await
    }

    /// Pets in the requested statuses, concatenated per status in request
    /// order. Each value may be a comma-separated list.
    pub async fn find_by_status(&self, values: &[String]) -> AppResult<Vec<PetAggregate>> {
        let statuses = parse_status_filter(values)?;
        if statuses.is_empty() {
            return Err(CoreError::Validation("At least one status is required".into()).into());
        }
        Ok(self.store.list_by_status(&statuses).await?)
    }

    /// Pets carrying every requested tag. Each value may be a
    /// comma-separated list.
    pub async fn find_by_tags(&self, values: &[String]) -> AppResult<Vec<PetAggregate>> {
        let names: Vec<String> = values
            .iter()
            .flat_map(|v| v.split(','))
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect();
        if names.is_empty() {
            return Err(CoreError::Validation("At least one tag is required".into()).into());
        }
        Ok(self.store.list_by_tags(&names).await?)
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Create a pet with its category, tags, and photos.
    ///
    /// Fails with `Conflict` if the name is taken. Categories and tags are
    /// matched by name; unmatched ones are created with the pet.
    pub async fn create_pet(&self, input: PetInput) -> AppResult<DbId> {
        self.ensure_name_available(&input.name, None).await?;

        let category = match &input.category {
            None => None,
            Some(CategoryInput::Name(name)) => Some(resolve_category(&self.store, name).await?),
            Some(CategoryInput::Id(id)) => {
                let category = self.store.find_category_by_id(*id).await?.ok_or(
                    CoreError::NotFound {
                        entity: "Category",
                        id: *id,
                    },
                )?;
                Some(Reference::Existing(category))
            }
        };
        let tags = resolve_tags(&self.store, &input.tag_names).await?;

        let id = self
            .store
            .create_pet(&NewPet {
                name: input.name,
                status: input.status,
                category,
                tags,
                photo_urls: input.photo_urls,
            })
            .await?;
        Ok(id)
    }

    /// Replace a pet's status, name, tags, and photos in one transaction.
    ///
    /// Empty tag or photo lists leave the stored ones unchanged, so this
    /// path cannot clear them. The category is only changed when the input
    /// refers to one by id; a name-only category is ignored.
    pub async fn replace_pet(&self, id: DbId, input: PetInput) -> AppResult<()> {
        self.load(id).await?;
        self.ensure_name_available(&input.name, Some(id)).await?;

        let category_id = match &input.category {
            Some(CategoryInput::Id(cid)) => {
                if self.store.find_category_by_id(*cid).await?.is_none() {
                    return Err(CoreError::NotFound {
                        entity: "Category",
                        id: *cid,
                    }
                    .into());
                }
                Some(*cid)
            }
            Some(CategoryInput::Name(_)) | None => None,
        };
        let tags = resolve_tags(&self.store, &input.tag_names).await?;

        let replacement = PetReplacement {
            name: input.name,
            status: input.status,
            category_id,
            tags,
            photo_urls: input.photo_urls,
        };
        self.apply_replacement(id, &replacement).await
    }

    /// Update only the name and status of a pet.
    pub async fn rename_pet(&self, id: DbId, name: &str, status: &str) -> AppResult<()> {
        validate_pet_name(name)?;
        let status: PetStatus = status.parse()?;

        self.load(id).await?;
        self.ensure_name_available(name, Some(id)).await?;

        if !self.store.update_pet_fields(id, name, status).await? {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// Delete a pet, its photos, and its tag associations.
    pub async fn delete_pet(&self, id: DbId) -> AppResult<()> {
        self.load(id).await?;
        if !self.store.delete_pet(id).await? {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// Append an uploaded photo to a pet. Returns the stored photo reference.
    pub async fn attach_photo(&self, id: DbId, file_name: &str) -> AppResult<String> {
        let pet = self.load(id).await?;
        let url = photo_url_path(id, file_name)?;
        let status: PetStatus = pet.status.parse()?;

        let mut photo_urls = pet.photo_urls;
        photo_urls.push(url.clone());

        let replacement = PetReplacement {
            name: pet.name,
            status,
            category_id: None,
            tags: Vec::new(),
            photo_urls,
        };
        self.apply_replacement(id, &replacement).await?;
        Ok(url)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn load(&self, id: DbId) -> AppResult<PetAggregate> {
        self.store.find_pet(id).await?.ok_or_else(|| not_found(id))
    }

    /// `writer` is the pet being renamed; it may keep its own name.
    async fn ensure_name_available(&self, name: &str, writer: Option<DbId>) -> AppResult<()> {
        let holder = self.store.find_pet_id_by_name(name).await?;
        if is_name_conflict(holder, writer) {
            return Err(CoreError::Conflict(format!("Pet with name '{name}' already exists")).into());
        }
        Ok(())
    }

    async fn apply_replacement(&self, id: DbId, replacement: &PetReplacement) -> AppResult<()> {
        if !self.store.replace_pet(id, replacement).await? {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Pet", id })
}
