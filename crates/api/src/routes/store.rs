//! Route definitions for the `/store` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::store;
use crate::state::AppState;

/// Store routes mounted at `/store`.
///
/// ```text
/// POST   /order              -> place_order
/// GET    /order/{orderId}    -> get_order
/// DELETE /order/{orderId}    -> delete_order
/// GET    /inventory          -> inventory (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/order", post(store::place_order))
        .route(
            "/order/{orderId}",
            get(store::get_order).delete(store::delete_order),
        )
        .route("/inventory", get(store::inventory))
}
