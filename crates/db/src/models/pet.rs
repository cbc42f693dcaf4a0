//! Pet aggregate models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use petstore_core::pet::{PetStatus, Reference};
use petstore_core::types::{DbId, Timestamp};

use crate::models::category::Category;
use crate::models::tag::Tag;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `pets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pet {
    pub id: DbId,
    pub name: String,
    pub status: String,
    pub category_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A pet with its category, tags, and photo URLs eagerly loaded.
///
/// This is the shape returned by every pet read endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetAggregate {
    pub id: DbId,
    pub name: String,
    pub status: String,
    pub category: Option<Category>,
    /// Sorted by tag name, not by the order the tags were submitted in.
    pub tags: Vec<Tag>,
    pub photo_urls: Vec<String>,
}

impl PetAggregate {
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Pet counts per status for `GET /store/inventory`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Inventory {
    pub available: i64,
    pub pending: i64,
    pub sold: i64,
}

impl Inventory {
    pub fn add(&mut self, status: PetStatus, count: i64) {
        match status {
            PetStatus::Available => self.available += count,
            PetStatus::Pending => self.pending += count,
            PetStatus::Sold => self.sold += count,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// Category as sent by clients: an id, a name, or both.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryPayload {
    pub id: Option<DbId>,
    #[serde(default)]
    pub name: String,
}

/// Tag as sent by clients. Only the name takes part in resolution.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagPayload {
    pub id: Option<DbId>,
    #[serde(default)]
    pub name: String,
}

/// Body of `POST /pet` and `PUT /pet`.
///
/// `status` stays a plain string here; it is parsed into a [`PetStatus`]
/// at the service boundary so an unknown value becomes a validation error
/// rather than a JSON decode failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetPayload {
    pub id: Option<DbId>,
    pub name: String,
    pub status: String,
    pub category: Option<CategoryPayload>,
    #[serde(default)]
    pub tags: Vec<TagPayload>,
    #[serde(default)]
    pub photo_urls: Vec<String>,
}

/// Form body of `POST /pet/{petId}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RenamePetForm {
    pub name: String,
    pub status: String,
}

// ---------------------------------------------------------------------------
// Repository inputs
// ---------------------------------------------------------------------------

/// A fully validated and resolved pet ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewPet {
    pub name: String,
    pub status: PetStatus,
    pub category: Option<Reference<Category>>,
    pub tags: Vec<Reference<Tag>>,
    pub photo_urls: Vec<String>,
}

/// Incoming state for the transactional replace.
///
/// Empty `tags` / `photo_urls` leave the stored collections untouched.
/// `category_id: None` keeps the current category.
#[derive(Debug, Clone)]
pub struct PetReplacement {
    pub name: String,
    pub status: PetStatus,
    pub category_id: Option<DbId>,
    pub tags: Vec<Reference<Tag>>,
    pub photo_urls: Vec<String>,
}
