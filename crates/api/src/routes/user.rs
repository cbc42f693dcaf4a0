//! Route definitions for the `/user` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// User routes mounted at `/user`.
///
/// ```text
/// POST   /                     -> create_user
/// POST   /createWithArray      -> create_users
/// POST   /createWithList       -> create_users
/// GET    /login                -> login
/// GET    /logout               -> logout
/// GET    /{username}           -> get_user
/// PUT    /{username}           -> update_user (owner)
/// DELETE /{username}           -> delete_user (owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(user::create_user))
        .route("/createWithArray", post(user::create_users))
        .route("/createWithList", post(user::create_users))
        .route("/login", get(user::login))
        .route("/logout", get(user::logout))
        .route(
            "/{username}",
            get(user::get_user)
                .put(user::update_user)
                .delete(user::delete_user),
        )
}
