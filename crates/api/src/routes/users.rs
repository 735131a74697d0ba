//! Route definitions for user profile and account management.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes for `/users/*` and the staff-only `/admin/users` listing.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(users::me).patch(users::update_me))
        .route("/users/me/become-partner", post(users::become_partner))
        .route("/users/me/email-change", post(users::request_email_change))
        .route(
            "/users/email-change/confirm",
            post(users::confirm_email_change),
        )
        .route("/admin/users", get(users::list))
}
