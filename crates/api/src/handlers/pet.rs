//! Handlers for the `/pet` resource.
//!
//! Every route here requires an authenticated user; the work itself is
//! delegated to [`PetService`](crate::services::pet::PetService).

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::{Form, Json};
use petstore_core::types::DbId;
use petstore_db::models::pet::{PetAggregate, PetPayload, RenamePetForm};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{values_of, QueryPairs};
use crate::response::ActionResponse;
use crate::services::pet::PetInput;
use crate::services::pet_service;
use crate::state::AppState;

/// POST /pet
///
/// Create a pet with its category, tags, and photo URLs. Returns the stored pet.
pub async fn create_pet(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<PetPayload>,
) -> AppResult<(StatusCode, Json<PetAggregate>)> {
    let input = PetInput::try_from(payload)?;
    let service = pet_service(&state);

    let pet_id = service.create_pet(input).await?;
    let pet = service.get_pet(pet_id).await?;

    tracing::info!(pet_id, user_id = user.user_id, "Pet created");
    Ok((StatusCode::CREATED, Json(pet)))
}

/// PUT /pet
///
/// Replace an existing pet identified by the `id` in the body.
pub async fn replace_pet(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<PetPayload>,
) -> AppResult<Json<ActionResponse>> {
    let pet_id = payload
        .id
        .ok_or_else(|| AppError::BadRequest("Pet id is required".into()))?;
    let input = PetInput::try_from(payload)?;

    pet_service(&state).replace_pet(pet_id, input).await?;

    tracing::info!(pet_id, user_id = user.user_id, "Pet replaced");
    Ok(Json(ActionResponse::message("Pet updated")))
}

/// GET /pet/findByStatus?status=available&status=sold
pub async fn find_by_status(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<QueryPairs>,
) -> AppResult<Json<Vec<PetAggregate>>> {
    let pets = pet_service(&state)
        .find_by_status(&values_of(&params, "status"))
        .await?;
    Ok(Json(pets))
}

/// GET /pet/findByTags?tags=a&tags=b
///
/// Only pets carrying every listed tag are returned.
pub async fn find_by_tags(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<QueryPairs>,
) -> AppResult<Json<Vec<PetAggregate>>> {
    let pets = pet_service(&state)
        .find_by_tags(&values_of(&params, "tags"))
        .await?;
    Ok(Json(pets))
}

/// GET /pet/{petId}
pub async fn get_pet(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(pet_id): Path<DbId>,
) -> AppResult<Json<PetAggregate>> {
    let pet = pet_service(&state).get_pet(pet_id).await?;
    Ok(Json(pet))
}

/// POST /pet/{petId}
///
/// Form-encoded `name` and `status`; tags, photos, and category are untouched.
pub async fn rename_pet(
    State(state): State<AppState>,
    user: AuthUser,
    Path(pet_id): Path<DbId>,
    Form(form): Form<RenamePetForm>,
) -> AppResult<Json<ActionResponse>> {
    pet_service(&state)
        .rename_pet(pet_id, &form.name, &form.status)
        .await?;

    tracing::info!(pet_id, user_id = user.user_id, name = %form.name, "Pet renamed");
    Ok(Json(ActionResponse::message("Pet updated")))
}

/// DELETE /pet/{petId}
pub async fn delete_pet(
    State(state): State<AppState>,
    user: AuthUser,
    Path(pet_id): Path<DbId>,
) -> AppResult<Json<ActionResponse>> {
    pet_service(&state).delete_pet(pet_id).await?;

    tracing::info!(pet_id, user_id = user.user_id, "Pet deleted");
    Ok(Json(ActionResponse::message("Pet deleted")))
}

/// POST /pet/{petId}/uploadImage
///
/// Multipart upload with a `file` field. Only the file name is kept; it
/// becomes a photo reference under `/pets/{petId}/`.
pub async fn upload_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(pet_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<ActionResponse>> {
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest("Uploaded file has no name".into()))?;
        // Drain the body so the stream can advance to the next field.
        field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file_name = Some(name);
    }

    let file_name =
        file_name.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let url = pet_service(&state).attach_photo(pet_id, &file_name).await?;

    tracing::info!(pet_id, user_id = user.user_id, url = %url, "Pet photo attached");
    Ok(Json(ActionResponse::message(format!("Photo uploaded: {url}"))))
}
