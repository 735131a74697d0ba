//! Route definitions for the `/lodgings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{lodgings, reviews};
use crate::state::AppState;

/// Routes for `/lodgings/*`, including nested reviews and the booking
/// calendar. Axum matches the static `/mine` segment before `/{id}`, so
/// the two cannot shadow each other.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lodgings", get(lodgings::list).post(lodgings::create))
        .route("/lodgings/mine", get(lodgings::list_mine))
        .route(
            "/lodgings/{id}",
            get(lodgings::get_by_id)
                .put(lodgings::update)
                .delete(lodgings::delete),
        )
        .route("/lodgings/{id}/availability", get(lodgings::availability))
        .route(
            "/lodgings/{id}/reviews",
            get(reviews::list_for_lodging).post(reviews::create),
        )
        .route("/lodgings/{id}/bookings", get(lodgings::list_bookings))
}
