//! Repository for the `orders` table.

use sqlx::PgPool;
use petstore_core::types::DbId;

use crate::models::order::{NewOrder, Order};

/// Column list for `orders` queries.
const COLUMNS: &str = "id, pet_id, quantity, ship_date, status, complete, created_at, updated_at";

/// Provides create/read/delete for store orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert a new order, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewOrder) -> Result<Order, sqlx::Error> {
        let query = format!(
            "INSERT INTO orders (pet_id, quantity, ship_date, status, complete) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(input.pet_id)
            .bind(input.quantity)
            .bind(input.ship_date)
            .bind(input.status.as_str())
            .bind(input.complete)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an order by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
