//! HTTP-level integration tests for the payment webhook: signature
//! verification, status transitions, and idempotency.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, NaiveDate, Utc};
use common::{body_json, post_json_auth, token_for, TEST_WEBHOOK_SECRET};
use sqlx::PgPool;
use staybook_payments::sign_body;
use tower::ServiceExt;

fn day(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}

/// Seed a lodging and a pending booking, returning the booking id.
async fn seed_booking(pool: &PgPool) -> i64 {
    let owner = common::create_active_user(pool, "host@test.com", true, false).await;
    let guest = common::create_active_user(pool, "guest@test.com", false, false).await;
    let (country_id,): (i64,) =
        sqlx::query_as("INSERT INTO countries (name) VALUES ('Testland') RETURNING id")
            .fetch_one(pool)
            .await
            .expect("country insert should succeed");
    let (city_id,): (i64,) =
        sqlx::query_as("INSERT INTO cities (name, country_id) VALUES ('Testville', $1) RETURNING id")
            .bind(country_id)
            .fetch_one(pool)
            .await
            .expect("city insert should succeed");
    let (lodging_id,): (i64,) = sqlx::query_as(
        "INSERT INTO lodgings
            (name, kind, city_id, owner_id, street, price_per_night_cents, max_guests, room_count)
         VALUES ('Test Flat', 'apartment', $1, $2, 'Main St', 10000, 4, 2)
         RETURNING id",
    )
    .bind(city_id)
    .bind(owner.id)
    .fetch_one(pool)
    .await
    .expect("lodging insert should succeed");

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/bookings",
        &token_for(&guest),
        serde_json::json!({ "lodging_id": lodging_id, "date_from": day(10), "date_to": day(12) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Deliver a signed webhook and return the response.
async fn deliver(
    pool: &PgPool,
    payload: &serde_json::Value,
    signature: &str,
) -> axum::response::Response {
    let body = payload.to_string();
    let app = common::build_test_app(pool.clone());
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/payments/webhook")
            .header("content-type", "application/json")
            .header("x-payment-signature", signature)
            .body(Body::from(body))
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

fn succeeded_event(booking_id: i64) -> serde_json::Value {
    serde_json::json!({
        "type": "payment_intent.succeeded",
        "data": {
            "id": format!("pi_test_{booking_id}"),
            "metadata": { "booking_id": booking_id.to_string() },
        },
    })
}

async fn booking_status(pool: &PgPool, booking_id: i64) -> String {
    let (status,): (String,) = sqlx::query_as("SELECT status::TEXT FROM bookings WHERE id = $1")
        .bind(booking_id)
        .fetch_one(pool)
        .await
        .expect("status lookup should succeed");
    status
}

/// A correctly signed success event marks the booking paid.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_webhook_marks_booking_paid(pool: PgPool) {
    let booking_id = seed_booking(&pool).await;
    let payload = succeeded_event(booking_id);
    let signature = sign_body(TEST_WEBHOOK_SECRET, payload.to_string().as_bytes());

    let response = deliver(&pool, &payload, &signature).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(booking_status(&pool, booking_id).await, "paid");
}

/// A bad signature is rejected and the booking stays pending.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_webhook_invalid_signature(pool: PgPool) {
    let booking_id = seed_booking(&pool).await;
    let payload = succeeded_event(booking_id);

    let response = deliver(&pool, &payload, "deadbeef").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(booking_status(&pool, booking_id).await, "payment_pending");

    // Signed with the wrong secret.
    let signature = sign_body("whsec_other_secret", payload.to_string().as_bytes());
    let response = deliver(&pool, &payload, &signature).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A missing signature header is rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_webhook_missing_signature(pool: PgPool) {
    let booking_id = seed_booking(&pool).await;
    let payload = succeeded_event(booking_id);

    let app = common::build_test_app(pool.clone());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/payments/webhook")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .expect("request should build"),
        )
        .await
        .expect("request should not fail");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Duplicate deliveries are acknowledged without changing state.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_webhook_idempotent(pool: PgPool) {
    let booking_id = seed_booking(&pool).await;
    let payload = succeeded_event(booking_id);
    let signature = sign_body(TEST_WEBHOOK_SECRET, payload.to_string().as_bytes());

    let response = deliver(&pool, &payload, &signature).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = deliver(&pool, &payload, &signature).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(booking_status(&pool, booking_id).await, "paid");
}

/// A success event for a canceled booking is acknowledged but the booking
/// stays canceled.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_webhook_canceled_booking(pool: PgPool) {
    let booking_id = seed_booking(&pool).await;
    sqlx::query("UPDATE bookings SET status = 'canceled' WHERE id = $1")
        .bind(booking_id)
        .execute(&pool)
        .await
        .expect("cancel should succeed");

    let payload = succeeded_event(booking_id);
    let signature = sign_body(TEST_WEBHOOK_SECRET, payload.to_string().as_bytes());
    let response = deliver(&pool, &payload, &signature).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(booking_status(&pool, booking_id).await, "canceled");
}

/// Unrelated event types are acknowledged and ignored.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_webhook_ignores_other_events(pool: PgPool) {
    let booking_id = seed_booking(&pool).await;
    let payload = serde_json::json!({
        "type": "payment_intent.created",
        "data": {
            "id": format!("pi_test_{booking_id}"),
            "metadata": { "booking_id": booking_id.to_string() },
        },
    });
    let signature = sign_body(TEST_WEBHOOK_SECRET, payload.to_string().as_bytes());

    let response = deliver(&pool, &payload, &signature).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(booking_status(&pool, booking_id).await, "payment_pending");
}

/// A signed but malformed payload returns 400.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_webhook_malformed_payload(pool: PgPool) {
    let body = "not json at all";
    let signature = sign_body(TEST_WEBHOOK_SECRET, body.as_bytes());

    let app = common::build_test_app(pool);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/payments/webhook")
                .header("x-payment-signature", signature)
                .body(Body::from(body))
                .expect("request should build"),
        )
        .await
        .expect("request should not fail");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
