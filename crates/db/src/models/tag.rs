//! Tag model and the pet/tag association row.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use petstore_core::types::DbId;

/// A row from the `tags` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
}

/// A tag joined through `pet_tags`, keyed by the owning pet.
#[derive(Debug, Clone, FromRow)]
pub struct PetTag {
    pub pet_id: DbId,
    pub id: DbId,
    pub name: String,
}

impl From<PetTag> for Tag {
    fn from(row: PetTag) -> Self {
        Tag {
            id: row.id,
            name: row.name,
        }
    }
}
