//! Handlers for the `/cities` resource. Public reads, staff-only writes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use staybook_core::error::DomainError;
use staybook_core::types::DbId;
use staybook_db::models::city::{City, CreateCity, UpdateCity};
use staybook_db::repositories::CityRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// Query parameters for `GET /cities`.
#[derive(Debug, Deserialize)]
pub struct ListCitiesParams {
    pub country_id: Option<DbId>,
}

/// GET /api/v1/cities?country_id=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListCitiesParams>,
) -> AppResult<Json<Vec<City>>> {
    let cities = CityRepo::list(&state.pool, params.country_id).await?;
    Ok(Json(cities))
}

/// GET /api/v1/cities/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<City>> {
    let city = CityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "City",
            id,
        }))?;
    Ok(Json(city))
}

/// POST /api/v1/cities
///
/// Fails with 409 when the referenced country does not exist.
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<CreateCity>,
) -> AppResult<(StatusCode, Json<City>)> {
    let city = CityRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(city)))
}

/// PUT /api/v1/cities/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCity>,
) -> AppResult<Json<City>> {
    let city = CityRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "City",
            id,
        }))?;
    Ok(Json(city))
}

/// DELETE /api/v1/cities/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CityRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Domain(DomainError::NotFound {
            entity: "City",
            id,
        }))
    }
}
