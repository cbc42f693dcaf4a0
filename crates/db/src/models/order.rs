//! Store order model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use petstore_core::order::OrderStatus;
use petstore_core::types::{DbId, Timestamp};

/// A row from the `orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: DbId,
    pub pet_id: DbId,
    pub quantity: i32,
    pub ship_date: Option<Timestamp>,
    pub status: String,
    pub complete: bool,
    #[serde(skip_serializing)]
    pub created_at: Timestamp,
    #[serde(skip_serializing)]
    pub updated_at: Timestamp,
}

/// Body of `POST /store/order`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub pet_id: DbId,
    pub quantity: i32,
    pub ship_date: Option<Timestamp>,
    /// Defaults to `placed` when omitted.
    pub status: Option<String>,
    #[serde(default)]
    pub complete: bool,
}

/// Validated order ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub pet_id: DbId,
    pub quantity: i32,
    pub ship_date: Option<Timestamp>,
    pub status: OrderStatus,
    pub complete: bool,
}
