//! Route definitions for the `/bookings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// GET  /            -> list own bookings
/// POST /            -> create booking
/// GET  /{id}        -> get booking (guest, lodging owner, or staff)
/// POST /{id}/pay    -> create payment intent
/// POST /{id}/cancel -> cancel booking
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bookings::list_mine).post(bookings::create))
        .route("/{id}", get(bookings::get_by_id))
        .route("/{id}/pay", post(bookings::pay))
        .route("/{id}/cancel", post(bookings::cancel))
}
