//! Route definitions for the `/cities` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::cities;
use crate::state::AppState;

/// Routes mounted at `/cities`. Reads are public, writes staff-only
/// (enforced by the handlers' extractors).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cities::list).post(cities::create))
        .route(
            "/{id}",
            get(cities::get_by_id)
                .put(cities::update)
                .delete(cities::delete),
        )
}
