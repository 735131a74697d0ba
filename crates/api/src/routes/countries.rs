//! Route definitions for the `/countries` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::countries;
use crate::state::AppState;

/// Routes mounted at `/countries`. Reads are public, writes staff-only
/// (enforced by the handlers' extractors).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(countries::list).post(countries::create))
        .route(
            "/{id}",
            get(countries::get_by_id)
                .put(countries::update)
                .delete(countries::delete),
        )
}
