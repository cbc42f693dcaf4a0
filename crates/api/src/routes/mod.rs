//! Route tables, one module per resource.

pub mod health;
pub mod pet;
pub mod store;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// All resource routes, mounted at the root.
///
/// ```text
/// /pet     -> pet::router()
/// /store   -> store::router()
/// /user    -> user::router()
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/pet", pet::router())
        .nest("/store", store::router())
        .nest("/user", user::router())
}
