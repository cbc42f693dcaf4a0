//! Photo URL model. Photos are owned by exactly one pet.

use serde::Serialize;
use sqlx::FromRow;
use petstore_core::types::{DbId, Timestamp};

/// A row from the `photo_urls` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PhotoUrl {
    pub id: DbId,
    pub pet_id: DbId,
    pub url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
