#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use staybook_api::auth::jwt::{generate_access_token, JwtConfig};
use staybook_api::auth::password::hash_password;
use staybook_api::config::ServerConfig;
use staybook_api::router::build_app_router;
use staybook_api::state::AppState;
use staybook_core::types::DbId;
use staybook_db::models::user::{CreateUser, User};
use staybook_db::repositories::UserRepo;
use staybook_payments::{PaymentApiError, PaymentIntent, PaymentProvider};

/// Webhook secret used by the test config and the webhook tests.
pub const TEST_WEBHOOK_SECRET: &str = "whsec_test_secret";

/// Plaintext password all fixture users share.
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Stub payment provider returning deterministic intents without a network.
pub struct StubPaymentProvider;

#[async_trait::async_trait]
impl PaymentProvider for StubPaymentProvider {
    async fn create_intent(
        &self,
        _amount_cents: i64,
        booking_id: DbId,
    ) -> Result<PaymentIntent, PaymentApiError> {
        Ok(PaymentIntent {
            id: format!("pi_test_{booking_id}"),
            client_secret: format!("pi_test_{booking_id}_secret"),
            status: "requires_payment_method".to_string(),
        })
    }
}

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-jwt-secret-that-is-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        payment_webhook_secret: TEST_WEBHOOK_SECRET.to_string(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a stub payment provider.
///
/// This goes through [`build_app_router`] so integration tests exercise the
/// same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        payments: Arc::new(StubPaymentProvider),
        mailer: None,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create an active user directly in the database.
///
/// The account is activated and flagged via direct SQL so fixtures do not
/// depend on the activation endpoint under test elsewhere.
pub async fn create_active_user(
    pool: &PgPool,
    email: &str,
    is_partner: bool,
    is_staff: bool,
) -> User {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: hashed,
            first_name: Some("Test".to_string()),
            last_name: Some("User".to_string()),
            security_token: "fixture-token".to_string(),
        },
    )
    .await
    .expect("user creation should succeed");

    sqlx::query(
        "UPDATE users SET is_active = true, security_token = NULL,
                          is_partner = $2, is_staff = $3
         WHERE id = $1",
    )
    .bind(user.id)
    .bind(is_partner)
    .bind(is_staff)
    .execute(pool)
    .await
    .expect("fixture activation should succeed");

    UserRepo::find_by_id(pool, user.id)
        .await
        .expect("lookup should succeed")
        .expect("user should exist")
}

/// Generate a valid access token for a fixture user.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, user.role(), &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Send a POST request with a JSON body and a Bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Send a body-less POST request with a Bearer token.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Send a PUT request with a JSON body and a Bearer token.
pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Send a PATCH request with a JSON body and a Bearer token.
pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PATCH")
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Send a DELETE request with a Bearer token.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Parse a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
