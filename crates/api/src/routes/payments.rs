//! Route definitions for payment provider callbacks.

use axum::routing::post;
use axum::Router;

use crate::handlers::payments;
use crate::state::AppState;

/// Routes mounted at `/payments`. The webhook authenticates with an HMAC
/// signature, not a Bearer token.
pub fn router() -> Router<AppState> {
    Router::new().route("/webhook", post(payments::webhook))
}
