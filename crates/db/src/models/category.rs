//! Category model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use petstore_core::types::DbId;

/// A row from the `categories` table, as exposed on a pet.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
}
