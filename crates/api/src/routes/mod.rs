pub mod auth;
pub mod bookings;
pub mod cities;
pub mod countries;
pub mod health;
pub mod lodgings;
pub mod payments;
pub mod reviews;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                      sign up (public)
/// /auth/activate                      activate account (public)
/// /auth/login                         login (public)
/// /auth/refresh                       refresh tokens (public)
/// /auth/logout                        logout (requires auth)
/// /auth/password-reset                request reset token (public)
/// /auth/password-reset/confirm        complete reset (public)
///
/// /users/me                           get, patch own profile
/// /users/me/become-partner            upgrade to partner (POST)
/// /users/me/email-change              request email change (POST)
/// /users/email-change/confirm         complete email change (POST, public)
/// /admin/users                        list accounts (staff only)
///
/// /countries                          list, create (create: staff)
/// /countries/{id}                     get, update, delete (writes: staff)
/// /cities                             list, create (create: staff)
/// /cities/{id}                        get, update, delete (writes: staff)
///
/// /lodgings                           list (public), create (partner)
/// /lodgings/mine                      own lodgings (partner)
/// /lodgings/{id}                      get (public), update, delete (owner/staff)
/// /lodgings/{id}/availability         date-range probe (public)
/// /lodgings/{id}/reviews              list (public), create (auth)
/// /lodgings/{id}/bookings             booking calendar (owner/staff)
/// /reviews/{id}                       update, delete (author)
///
/// /bookings                           list own, create (auth)
/// /bookings/{id}                      get (guest/owner/staff)
/// /bookings/{id}/pay                  create payment intent (guest)
/// /bookings/{id}/cancel               cancel (guest/staff)
///
/// /payments/webhook                   provider webhook (HMAC-signed)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(users::router())
        .nest("/countries", countries::router())
        .nest("/cities", cities::router())
        .merge(lodgings::router())
        .merge(reviews::router())
        .nest("/bookings", bookings::router())
        .nest("/payments", payments::router())
}
