//! HTTP-level integration tests for the countries and cities catalog.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, post_json_auth, put_json_auth, token_for};
use sqlx::PgPool;

/// Create a country via the API as staff, returning its id.
async fn create_country(pool: &PgPool, staff_token: &str, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/countries",
        staff_token,
        serde_json::json!({ "name": name }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Staff can create, update, and delete countries; reads are public.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_country_crud(pool: PgPool) {
    let staff = common::create_active_user(&pool, "staff@test.com", false, true).await;
    let token = token_for(&staff);

    let id = create_country(&pool, &token, "Portugal").await;

    // Public read.
    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/countries/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Portugal");

    // Update.
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/countries/{id}"),
        &token,
        serde_json::json!({ "name": "Portuguese Republic" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Portuguese Republic");

    // Delete.
    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/countries/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/countries/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Country writes require the staff role.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_country_write_requires_staff(pool: PgPool) {
    let guest = common::create_active_user(&pool, "guest@test.com", false, false).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/countries",
        &token_for(&guest),
        serde_json::json!({ "name": "Nope" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Country names are unique; a duplicate insert returns 409.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_country_duplicate_name(pool: PgPool) {
    let staff = common::create_active_user(&pool, "staff@test.com", false, true).await;
    let token = token_for(&staff);
    create_country(&pool, &token, "France").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/countries",
        &token,
        serde_json::json!({ "name": "France" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Deleting a country with cities attached is blocked with 409.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_country_delete_blocked_by_cities(pool: PgPool) {
    let staff = common::create_active_user(&pool, "staff@test.com", false, true).await;
    let token = token_for(&staff);
    let country_id = create_country(&pool, &token, "Spain").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/cities",
        &token,
        serde_json::json!({ "name": "Madrid", "country_id": country_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &format!("/api/v1/countries/{country_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Cities can be filtered by country.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_city_filter_by_country(pool: PgPool) {
    let staff = common::create_active_user(&pool, "staff@test.com", false, true).await;
    let token = token_for(&staff);
    let pt = create_country(&pool, &token, "Portugal").await;
    let es = create_country(&pool, &token, "Spain").await;

    for (name, country_id) in [("Lisbon", pt), ("Porto", pt), ("Seville", es)] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            "/api/v1/cities",
            &token,
            serde_json::json!({ "name": name, "country_id": country_id }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/cities?country_id={pt}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/cities").await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 3);
}

/// Creating a city for a nonexistent country returns 409 (FK violation).
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_city_unknown_country(pool: PgPool) {
    let staff = common::create_active_user(&pool, "staff@test.com", false, true).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/cities",
        &token_for(&staff),
        serde_json::json!({ "name": "Atlantis", "country_id": 9999 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// City names are unique within a country but can repeat across countries.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_city_unique_per_country(pool: PgPool) {
    let staff = common::create_active_user(&pool, "staff@test.com", false, true).await;
    let token = token_for(&staff);
    let uk = create_country(&pool, &token, "United Kingdom").await;
    let ca = create_country(&pool, &token, "Canada").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/cities",
        &token,
        serde_json::json!({ "name": "London", "country_id": uk }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Same name, same country: conflict.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/cities",
        &token,
        serde_json::json!({ "name": "London", "country_id": uk }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Same name, different country: fine.
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/cities",
        &token,
        serde_json::json!({ "name": "London", "country_id": ca }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}
