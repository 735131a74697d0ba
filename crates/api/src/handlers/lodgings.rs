//! Handlers for the `/lodgings` resource.
//!
//! Reads are public; writes require the partner role, and mutations on an
//! existing lodging are restricted to its owner (or staff).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use staybook_core::booking::validate_range;
use staybook_core::error::DomainError;
use staybook_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use staybook_core::roles::ROLE_STAFF;
use staybook_core::types::{Day, DbId};
use staybook_db::models::booking::Booking;
use staybook_db::models::lodging::{
    CreateLodging, Lodging, LodgingFilter, LodgingKind, UpdateLodging,
};
use staybook_db::repositories::{BookingRepo, LodgingRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequirePartner;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /lodgings` (filters + pagination).
#[derive(Debug, Deserialize)]
pub struct ListLodgingsParams {
    pub city_id: Option<DbId>,
    pub kind: Option<LodgingKind>,
    pub max_price_cents: Option<i64>,
    pub min_guests: Option<i32>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /lodgings/{id}/availability`.
#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    pub date_from: Day,
    pub date_to: Day,
}

/// Response body for the availability check.
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/lodgings
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListLodgingsParams>,
) -> AppResult<Json<Vec<Lodging>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let filter = LodgingFilter {
        city_id: params.city_id,
        kind: params.kind,
        max_price_cents: params.max_price_cents,
        min_guests: params.min_guests,
    };

    let lodgings = LodgingRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(lodgings))
}

/// GET /api/v1/lodgings/mine
pub async fn list_mine(
    State(state): State<AppState>,
    RequirePartner(partner): RequirePartner,
) -> AppResult<Json<Vec<Lodging>>> {
    let lodgings = LodgingRepo::list_for_owner(&state.pool, partner.user_id).await?;
    Ok(Json(lodgings))
}

/// GET /api/v1/lodgings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Lodging>> {
    let lodging = LodgingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "Lodging",
            id,
        }))?;
    Ok(Json(lodging))
}

/// POST /api/v1/lodgings
///
/// The owner is always the authenticated partner; a 409 signals a missing city.
pub async fn create(
    State(state): State<AppState>,
    RequirePartner(partner): RequirePartner,
    Json(input): Json<CreateLodging>,
) -> AppResult<(StatusCode, Json<Lodging>)> {
    validate_lodging_numbers(
        Some(input.price_per_night_cents),
        Some(input.max_guests),
        Some(input.room_count),
    )?;

    let lodging = LodgingRepo::create(&state.pool, partner.user_id, &input).await?;
    tracing::info!(
        lodging_id = lodging.id,
        owner_id = partner.user_id,
        "Lodging created",
    );
    Ok((StatusCode::CREATED, Json(lodging)))
}

/// PUT /api/v1/lodgings/{id}
pub async fn update(
    State(state): State<AppState>,
    RequirePartner(partner): RequirePartner,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLodging>,
) -> AppResult<Json<Lodging>> {
    validate_lodging_numbers(input.price_per_night_cents, input.max_guests, input.room_count)?;
    ensure_owner_or_staff(&state, id, &partner).await?;

    let lodging = LodgingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "Lodging",
            id,
        }))?;
    Ok(Json(lodging))
}

/// DELETE /api/v1/lodgings/{id}
///
/// Fails with 409 while bookings still reference the lodging.
pub async fn delete(
    State(state): State<AppState>,
    RequirePartner(partner): RequirePartner,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_owner_or_staff(&state, id, &partner).await?;

    let deleted = LodgingRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Domain(DomainError::NotFound {
            entity: "Lodging",
            id,
        }))
    }
}

/// GET /api/v1/lodgings/{id}/availability?date_from=&date_to=
///
/// Read-only probe; booking creation re-checks under a lock, so a `true`
/// here is advisory, not a hold on the dates.
pub async fn availability(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<AvailabilityParams>,
) -> AppResult<Json<AvailabilityResponse>> {
    let today = chrono::Utc::now().date_naive();
    validate_range(params.date_from, params.date_to, today)?;

    // 404 for unknown lodgings rather than a vacuous "available".
    LodgingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "Lodging",
            id,
        }))?;

    let overlaps = BookingRepo::has_overlap(&state.pool, id, params.date_from, params.date_to)
        .await?;
    Ok(Json(AvailabilityResponse {
        available: !overlaps,
    }))
}

/// GET /api/v1/lodgings/{id}/bookings
///
/// Booking calendar for a lodging, visible to its owner and staff only.
pub async fn list_bookings(
    State(state): State<AppState>,
    RequirePartner(partner): RequirePartner,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Booking>>> {
    ensure_owner_or_staff(&state, id, &partner).await?;

    let bookings = BookingRepo::list_for_lodging(&state.pool, id).await?;
    Ok(Json(bookings))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject non-positive prices, guest counts, and room counts before they hit
/// the CHECK constraints (a 400 beats a 500 here).
fn validate_lodging_numbers(
    price_per_night_cents: Option<i64>,
    max_guests: Option<i32>,
    room_count: Option<i32>,
) -> Result<(), AppError> {
    if price_per_night_cents.is_some_and(|p| p <= 0) {
        return Err(AppError::Domain(DomainError::Validation(
            "price_per_night_cents must be positive".into(),
        )));
    }
    if max_guests.is_some_and(|g| g <= 0) {
        return Err(AppError::Domain(DomainError::Validation(
            "max_guests must be positive".into(),
        )));
    }
    if room_count.is_some_and(|r| r <= 0) {
        return Err(AppError::Domain(DomainError::Validation(
            "room_count must be positive".into(),
        )));
    }
    Ok(())
}

/// Load the lodging and require the caller to be its owner or staff.
async fn ensure_owner_or_staff(
    state: &AppState,
    lodging_id: DbId,
    user: &AuthUser,
) -> Result<Lodging, AppError> {
    let lodging = LodgingRepo::find_by_id(&state.pool, lodging_id)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "Lodging",
            id: lodging_id,
        }))?;

    if lodging.owner_id != user.user_id && user.role != ROLE_STAFF {
        return Err(AppError::Domain(DomainError::Forbidden(
            "Only the lodging owner may do this".into(),
        )));
    }
    Ok(lodging)
}
