//! Handlers for the `/store` resource (orders and inventory).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use petstore_core::error::CoreError;
use petstore_core::order::{validate_quantity, OrderStatus};
use petstore_core::types::DbId;
use petstore_db::models::order::{NewOrder, Order, OrderPayload};
use petstore_db::models::pet::Inventory;
use petstore_db::repositories::{OrderRepo, PetRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ActionResponse;
use crate::state::AppState;

/// POST /store/order
///
/// Place an order for an existing pet. Returns the stored order.
pub async fn place_order(
    State(state): State<AppState>,
    Json(payload): Json<OrderPayload>,
) -> AppResult<(StatusCode, Json<Order>)> {
    validate_quantity(payload.quantity)?;
    let status = match payload.status.as_deref() {
        Some(raw) => raw.parse::<OrderStatus>()?,
        None => OrderStatus::Placed,
    };

    if PetRepo::find_by_id(&state.pool, payload.pet_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Pet",
            id: payload.pet_id,
        }));
    }

    let order = OrderRepo::create(
        &state.pool,
        &NewOrder {
            pet_id: payload.pet_id,
            quantity: payload.quantity,
            ship_date: payload.ship_date,
            status,
            complete: payload.complete,
        },
    )
    .await?;

    tracing::info!(order_id = order.id, pet_id = order.pet_id, "Order placed");
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /store/order/{orderId}
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
) -> AppResult<Json<Order>> {
    let order = OrderRepo::find_by_id(&state.pool, order_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id: order_id,
        }))?;
    Ok(Json(order))
}

/// DELETE /store/order/{orderId}
pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
) -> AppResult<Json<ActionResponse>> {
    if !OrderRepo::delete(&state.pool, order_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id: order_id,
        }));
    }

    tracing::info!(order_id, "Order deleted");
    Ok(Json(ActionResponse::message("Order deleted")))
}

/// GET /store/inventory
///
/// Pet counts per status.
pub async fn inventory(State(state): State<AppState>, _user: AuthUser) -> AppResult<Json<Inventory>> {
    let inventory = PetRepo::inventory(&state.pool).await?;
    Ok(Json(inventory))
}
