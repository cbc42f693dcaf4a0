//! Route definitions for the `/pet` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::pet;
use crate::state::AppState;

/// Pet routes mounted at `/pet`. All require authentication.
///
/// ```text
/// POST   /                       -> create_pet
/// PUT    /                       -> replace_pet
/// GET    /findByStatus           -> find_by_status
/// GET    /findByTags             -> find_by_tags
/// GET    /{petId}                -> get_pet
/// POST   /{petId}                -> rename_pet (form)
/// DELETE /{petId}                -> delete_pet
/// POST   /{petId}/uploadImage    -> upload_image (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(pet::create_pet).put(pet::replace_pet))
        .route("/findByStatus", get(pet::find_by_status))
        .route("/findByTags", get(pet::find_by_tags))
        .route(
            "/{petId}",
            get(pet::get_pet)
                .post(pet::rename_pet)
                .delete(pet::delete_pet),
        )
        .route("/{petId}/uploadImage", post(pet::upload_image))
}
