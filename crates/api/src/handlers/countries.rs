//! Handlers for the `/countries` resource. Public reads, staff-only writes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use staybook_core::error::DomainError;
use staybook_core::types::DbId;
use staybook_db::models::country::{Country, CreateCountry, UpdateCountry};
use staybook_db::repositories::CountryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// GET /api/v1/countries
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Country>>> {
    let countries = CountryRepo::list(&state.pool).await?;
    Ok(Json(countries))
}

/// GET /api/v1/countries/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Country>> {
    let country = CountryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "Country",
            id,
        }))?;
    Ok(Json(country))
}

/// POST /api/v1/countries
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<CreateCountry>,
) -> AppResult<(StatusCode, Json<Country>)> {
    let country = CountryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(country)))
}

/// PUT /api/v1/countries/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCountry>,
) -> AppResult<Json<Country>> {
    let country = CountryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "Country",
            id,
        }))?;
    Ok(Json(country))
}

/// DELETE /api/v1/countries/{id}
///
/// Fails with 409 while cities still reference the country.
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CountryRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Domain(DomainError::NotFound {
            entity: "Country",
            id,
        }))
    }
}
