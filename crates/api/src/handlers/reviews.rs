//! Handlers for reviews: listing and creation live under
//! `/lodgings/{id}/reviews`, edits and deletes under `/reviews/{id}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use staybook_core::error::DomainError;
use staybook_core::roles::ROLE_STAFF;
use staybook_core::types::DbId;
use staybook_db::models::review::{CreateReview, Review, UpdateReview};
use staybook_db::repositories::{LodgingRepo, ReviewRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// Review scores are a 1..=10 scale.
const MIN_SCORE: i32 = 1;
const MAX_SCORE: i32 = 10;

/// Request body for `POST /lodgings/{id}/reviews`.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub body: String,
    pub score: i32,
}

/// GET /api/v1/lodgings/{id}/reviews
pub async fn list_for_lodging(
    State(state): State<AppState>,
    Path(lodging_id): Path<DbId>,
) -> AppResult<Json<Vec<Review>>> {
    LodgingRepo::find_by_id(&state.pool, lodging_id)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "Lodging",
            id: lodging_id,
        }))?;

    let reviews = ReviewRepo::list_for_lodging(&state.pool, lodging_id).await?;
    Ok(Json(reviews))
}

/// POST /api/v1/lodgings/{id}/reviews
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(auth_user): RequireAuth,
    Path(lodging_id): Path<DbId>,
    Json(input): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<Review>)> {
    validate_score(input.score)?;
    if input.body.trim().is_empty() {
        return Err(AppError::Domain(DomainError::Validation(
            "Review body must not be empty".into(),
        )));
    }

    LodgingRepo::find_by_id(&state.pool, lodging_id)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "Lodging",
            id: lodging_id,
        }))?;

    let review = ReviewRepo::create(
        &state.pool,
        &CreateReview {
            lodging_id,
            user_id: auth_user.user_id,
            body: input.body,
            score: input.score,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// PUT /api/v1/reviews/{id}
///
/// Only the author may edit a review.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(auth_user): RequireAuth,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReview>,
) -> AppResult<Json<Review>> {
    if let Some(score) = input.score {
        validate_score(score)?;
    }

    let existing = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "Review",
            id,
        }))?;
    if existing.user_id != auth_user.user_id {
        return Err(AppError::Domain(DomainError::Forbidden(
            "Only the author may edit a review".into(),
        )));
    }

    let review = ReviewRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "Review",
            id,
        }))?;
    Ok(Json(review))
}

/// DELETE /api/v1/reviews/{id}
///
/// The author may delete their own review; staff may moderate any.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(auth_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "Review",
            id,
        }))?;
    if existing.user_id != auth_user.user_id && auth_user.role != ROLE_STAFF {
        return Err(AppError::Domain(DomainError::Forbidden(
            "Only the author may delete a review".into(),
        )));
    }

    ReviewRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn validate_score(score: i32) -> Result<(), AppError> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(AppError::Domain(DomainError::Validation(format!(
            "score must be between {MIN_SCORE} and {MAX_SCORE}"
        ))));
    }
    Ok(())
}
