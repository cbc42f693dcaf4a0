//! HTTP-level integration tests for the `/pet` resource.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_json, build_test_app, create_user_and_login, delete_auth, get_auth, post_file_auth,
    post_form_auth, post_json, post_json_auth, put_json_auth, send_json,
};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn pet_body(name: &str, status: &str, tags: &[&str]) -> Value {
    json!({
        "name": name,
        "status": status,
        "category": { "name": "Dogs" },
        "tags": tags.iter().map(|t| json!({ "name": t })).collect::<Vec<_>>(),
        "photoUrls": [format!("/img/{name}.png")],
    })
}

async fn create_pet(pool: &PgPool, token: &str, body: Value) -> Value {
    let response = post_json_auth(build_test_app(pool.clone()), "/pet", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn fetch_pet(pool: &PgPool, token: &str, id: i64) -> Value {
    let response = get_auth(build_test_app(pool.clone()), &format!("/pet/{id}"), Some(token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

fn tag_names(pet: &Value) -> Vec<String> {
    pet["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect()
}

fn pet_names(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_the_stored_aggregate(pool: PgPool) {
    let token = create_user_and_login(&pool, "keeper").await;

    let pet = create_pet(&pool, &token, pet_body("Rex", "available", &["dog", "young"])).await;

    assert!(pet["id"].as_i64().unwrap() > 0);
    assert_eq!(pet["name"], "Rex");
    assert_eq!(pet["status"], "available");
    assert_eq!(pet["category"]["name"], "Dogs");
    assert_eq!(tag_names(&pet), vec!["dog", "young"]);
    assert_eq!(pet["photoUrls"], json!(["/img/Rex.png"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_without_token_is_unauthorized(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/pet", pet_body("Rex", "available", &[])).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_unknown_status_is_rejected(pool: PgPool) {
    let token = create_user_and_login(&pool, "keeper").await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/pet",
        &token,
        pet_body("Rex", "adopted", &["dog"]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    for table in ["pets", "tags", "categories", "photo_urls"] {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0, "rejected create must not write to {table}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_duplicate_name_conflicts(pool: PgPool) {
    let token = create_user_and_login(&pool, "keeper").await;
    create_pet(&pool, &token, pet_body("Rex", "available", &["dog"])).await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/pet",
        &token,
        pet_body("Rex", "pending", &["cat"]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let tags: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags WHERE name = 'cat'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(tags, 0, "rejected create must not leave a tag behind");
}

// ---------------------------------------------------------------------------
// Replace
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn replace_with_empty_tags_keeps_existing_tags(pool: PgPool) {
    let token = create_user_and_login(&pool, "keeper").await;
    let pet = create_pet(&pool, &token, pet_body("Rex", "available", &["dog"])).await;
    let id = pet["id"].as_i64().unwrap();

    let response = put_json_auth(
        build_test_app(pool.clone()),
        "/pet",
        &token,
        json!({ "id": id, "name": "Rex", "status": "sold", "tags": [] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);

    let pet = fetch_pet(&pool, &token, id).await;
    assert_eq!(pet["status"], "sold");
    assert_eq!(tag_names(&pet), vec!["dog"]);
    assert_eq!(pet["photoUrls"], json!(["/img/Rex.png"]));
    assert_eq!(pet["category"]["name"], "Dogs");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replace_with_tags_swaps_the_tag_set(pool: PgPool) {
    let token = create_user_and_login(&pool, "keeper").await;
    let pet = create_pet(&pool, &token, pet_body("Rex", "available", &["dog", "young"])).await;
    let id = pet["id"].as_i64().unwrap();

    let response = put_json_auth(
        build_test_app(pool.clone()),
        "/pet",
        &token,
        json!({
            "id": id,
            "name": "Rex",
            "status": "pending",
            "tags": [{ "name": "old" }],
            "photoUrls": ["/img/rex-1.png", "/img/rex-2.png"],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let pet = fetch_pet(&pool, &token, id).await;
    assert_eq!(tag_names(&pet), vec!["old"]);
    assert_eq!(pet["photoUrls"], json!(["/img/rex-1.png", "/img/rex-2.png"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replace_without_id_is_bad_request(pool: PgPool) {
    let token = create_user_and_login(&pool, "keeper").await;

    let response = put_json_auth(
        build_test_app(pool.clone()),
        "/pet",
        &token,
        json!({ "name": "Rex", "status": "sold" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replace_unknown_pet_is_not_found(pool: PgPool) {
    let token = create_user_and_login(&pool, "keeper").await;

    let response = put_json_auth(
        build_test_app(pool.clone()),
        "/pet",
        &token,
        json!({ "id": 9999, "name": "Ghost", "status": "sold" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replace_onto_another_pets_name_conflicts(pool: PgPool) {
    let token = create_user_and_login(&pool, "keeper").await;
    create_pet(&pool, &token, pet_body("Rex", "available", &[])).await;
    let max = create_pet(&pool, &token, pet_body("Max", "available", &[])).await;

    let response = put_json_auth(
        build_test_app(pool.clone()),
        "/pet",
        &token,
        json!({ "id": max["id"], "name": "Rex", "status": "available" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_by_status_accepts_repeated_and_comma_separated_values(pool: PgPool) {
    let token = create_user_and_login(&pool, "keeper").await;
    create_pet(&pool, &token, pet_body("Rex", "available", &[])).await;
    create_pet(&pool, &token, pet_body("Max", "sold", &[])).await;
    create_pet(&pool, &token, pet_body("Bo", "pending", &[])).await;

    let response = get_auth(
        build_test_app(pool.clone()),
        "/pet/findByStatus?status=sold&status=available",
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(pet_names(&body_json(response).await), vec!["Max", "Rex"]);

    let response = get_auth(
        build_test_app(pool.clone()),
        "/pet/findByStatus?status=pending,sold",
        Some(&token),
    )
    .await;
    assert_eq!(pet_names(&body_json(response).await), vec!["Bo", "Max"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_by_status_rejects_missing_or_unknown_status(pool: PgPool) {
    let token = create_user_and_login(&pool, "keeper").await;

    let response = get_auth(build_test_app(pool.clone()), "/pet/findByStatus", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get_auth(
        build_test_app(pool.clone()),
        "/pet/findByStatus?status=lost",
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_by_tags_returns_pets_with_every_tag(pool: PgPool) {
    let token = create_user_and_login(&pool, "keeper").await;
    create_pet(&pool, &token, pet_body("Rex", "available", &["dog", "young"])).await;
    create_pet(&pool, &token, pet_body("Max", "available", &["dog"])).await;

    let response = get_auth(
        build_test_app(pool.clone()),
        "/pet/findByTags?tags=dog&tags=young",
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(pet_names(&body_json(response).await), vec!["Rex"]);

    let response = get_auth(
        build_test_app(pool.clone()),
        "/pet/findByTags?tags=dog",
        Some(&token),
    )
    .await;
    let mut names = pet_names(&body_json(response).await);
    names.sort();
    assert_eq!(names, vec!["Max", "Rex"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_unknown_pet_is_not_found(pool: PgPool) {
    let token = create_user_and_login(&pool, "keeper").await;
    let response = get_auth(build_test_app(pool.clone()), "/pet/4242", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Rename, upload, delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn form_update_changes_name_and_status_only(pool: PgPool) {
    let token = create_user_and_login(&pool, "keeper").await;
    let pet = create_pet(&pool, &token, pet_body("Rex", "available", &["dog"])).await;
    let id = pet["id"].as_i64().unwrap();

    let response = post_form_auth(
        build_test_app(pool.clone()),
        &format!("/pet/{id}"),
        &token,
        "name=Rexy&status=pending",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let pet = fetch_pet(&pool, &token, id).await;
    assert_eq!(pet["name"], "Rexy");
    assert_eq!(pet["status"], "pending");
    assert_eq!(tag_names(&pet), vec!["dog"]);
    assert_eq!(pet["photoUrls"], json!(["/img/Rex.png"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_appends_a_photo_reference(pool: PgPool) {
    let token = create_user_and_login(&pool, "keeper").await;
    let pet = create_pet(&pool, &token, pet_body("Rex", "available", &[])).await;
    let id = pet["id"].as_i64().unwrap();

    let response = post_file_auth(
        build_test_app(pool.clone()),
        &format!("/pet/{id}/uploadImage"),
        &token,
        "portrait.jpg",
        b"\xff\xd8\xff\xe0fake-jpeg",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let pet = fetch_pet(&pool, &token, id).await;
    assert_eq!(
        pet["photoUrls"],
        json!(["/img/Rex.png", format!("/pets/{id}/portrait.jpg")])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_removes_pet_and_second_delete_is_not_found(pool: PgPool) {
    let token = create_user_and_login(&pool, "keeper").await;
    let pet = create_pet(&pool, &token, pet_body("Rex", "available", &["dog"])).await;
    let uri = format!("/pet/{}", pet["id"]);

    let response = delete_auth(build_test_app(pool.clone()), &uri, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete_auth(build_test_app(pool.clone()), &uri, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let photos: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM photo_urls")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(photos, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_json_body_is_rejected(pool: PgPool) {
    let token = create_user_and_login(&pool, "keeper").await;

    let response = send_json(
        build_test_app(pool.clone()),
        Method::POST,
        "/pet",
        Some(&token),
        json!({ "status": "available" }),
    )
    .await;

    assert!(response.status().is_client_error());
}
