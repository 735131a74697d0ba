//! Route definitions for standalone review edits.

use axum::routing::put;
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

/// Routes for `/reviews/{id}` (creation lives under `/lodgings/{id}/reviews`).
pub fn router() -> Router<AppState> {
    Router::new().route("/reviews/{id}", put(reviews::update).delete(reviews::delete))
}
