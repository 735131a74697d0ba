//! Handlers for the `/bookings` resource.
//!
//! Creation runs the availability check and insert atomically in the
//! repository; this module owns date validation, authorization, and the
//! payment-intent flow.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use staybook_core::booking::{nights, validate_range};
use staybook_core::error::DomainError;
use staybook_core::reference::generate_reference_code;
use staybook_core::roles::ROLE_STAFF;
use staybook_core::types::{Day, DbId};
use staybook_db::models::booking::{Booking, BookingStatus, CreateBooking};
use staybook_db::repositories::{BookingCreateOutcome, BookingRepo, LodgingRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /bookings`.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub lodging_id: DbId,
    pub date_from: Day,
    pub date_to: Day,
}

/// Response body for `POST /bookings/{id}/pay`.
#[derive(Debug, Serialize)]
pub struct PayResponse {
    /// Provider-assigned payment intent id, also stored on the booking.
    pub payment_intent_id: String,
    /// Secret the browser needs to complete the payment.
    pub client_secret: String,
    /// Total charge in minor currency units (nights x nightly price).
    pub amount_cents: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/bookings
///
/// Create a booking in `payment_pending` status. Overlapping dates yield 409.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(auth_user): RequireAuth,
    Json(input): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let today = chrono::Utc::now().date_naive();
    validate_range(input.date_from, input.date_to, today)?;

    let create = CreateBooking {
        lodging_id: input.lodging_id,
        user_id: auth_user.user_id,
        date_from: input.date_from,
        date_to: input.date_to,
        reference_code: generate_reference_code(),
    };

    match BookingRepo::create_checked(&state.pool, &create).await? {
        BookingCreateOutcome::Created(booking) => {
            tracing::info!(
                booking_id = booking.id,
                lodging_id = booking.lodging_id,
                reference_code = %booking.reference_code,
                "Booking created",
            );
            Ok((StatusCode::CREATED, Json(booking)))
        }
        BookingCreateOutcome::Overlap => Err(AppError::Domain(DomainError::Conflict(
            "Requested dates are not available".into(),
        ))),
        BookingCreateOutcome::LodgingMissing => {
            Err(AppError::Domain(DomainError::NotFound {
                entity: "Lodging",
                id: input.lodging_id,
            }))
        }
    }
}

/// GET /api/v1/bookings
///
/// The authenticated user's own bookings, newest first.
pub async fn list_mine(
    State(state): State<AppState>,
    RequireAuth(auth_user): RequireAuth,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = BookingRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(bookings))
}

/// GET /api/v1/bookings/{id}
///
/// Visible to the guest who booked, the lodging owner, and staff.
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(auth_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Booking>> {
    let booking = find_booking(&state, id).await?;

    if booking.user_id != auth_user.user_id && auth_user.role != ROLE_STAFF {
        let lodging = LodgingRepo::find_by_id(&state.pool, booking.lodging_id).await?;
        let is_owner = lodging.is_some_and(|l| l.owner_id == auth_user.user_id);
        if !is_owner {
            return Err(AppError::Domain(DomainError::Forbidden(
                "Not your booking".into(),
            )));
        }
    }

    Ok(Json(booking))
}

/// POST /api/v1/bookings/{id}/pay
///
/// Create a payment intent for a pending booking. The amount is computed
/// server-side from the current nightly price; the client never sends it.
pub async fn pay(
    State(state): State<AppState>,
    RequireAuth(auth_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<PayResponse>> {
    let booking = find_booking(&state, id).await?;

    if booking.user_id != auth_user.user_id {
        return Err(AppError::Domain(DomainError::Forbidden(
            "Not your booking".into(),
        )));
    }
    if booking.status != BookingStatus::PaymentPending {
        return Err(AppError::Domain(DomainError::Conflict(
            "Booking is not awaiting payment".into(),
        )));
    }

    let lodging = LodgingRepo::find_by_id(&state.pool, booking.lodging_id)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "Lodging",
            id: booking.lodging_id,
        }))?;

    let amount_cents = nights(booking.date_from, booking.date_to)
        .checked_mul(lodging.price_per_night_cents)
        .ok_or_else(|| {
            AppError::Domain(DomainError::Validation(
                "Booking amount exceeds the supported maximum".into(),
            ))
        })?;

    let intent = state.payments.create_intent(amount_cents, booking.id).await?;

    // Guards on status again; the webhook may have landed meanwhile.
    BookingRepo::set_payment_intent(&state.pool, booking.id, &intent.id)
        .await?
        .ok_or_else(|| {
            AppError::Domain(DomainError::Conflict(
                "Booking is not awaiting payment".into(),
            ))
        })?;

    Ok(Json(PayResponse {
        payment_intent_id: intent.id,
        client_secret: intent.client_secret,
        amount_cents,
    }))
}

/// POST /api/v1/bookings/{id}/cancel
///
/// Cancel a booking, freeing its dates. The guest or staff may cancel; both
/// pending and paid bookings are cancelable. Refunds are out of band.
pub async fn cancel(
    State(state): State<AppState>,
    RequireAuth(auth_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Booking>> {
    let booking = find_booking(&state, id).await?;

    if booking.user_id != auth_user.user_id && auth_user.role != ROLE_STAFF {
        return Err(AppError::Domain(DomainError::Forbidden(
            "Not your booking".into(),
        )));
    }

    let canceled = BookingRepo::cancel(&state.pool, id).await?.ok_or_else(|| {
        AppError::Domain(DomainError::Conflict("Booking is already canceled".into()))
    })?;

    tracing::info!(booking_id = canceled.id, "Booking canceled");
    Ok(Json(canceled))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_booking(state: &AppState, id: DbId) -> Result<Booking, AppError> {
    BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "Booking",
            id,
        }))
}
