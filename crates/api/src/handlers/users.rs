//! Handlers for the `/users` resource (own profile, partner upgrade,
//! email change) and the staff-only user listing.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use staybook_core::error::DomainError;
use staybook_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use staybook_db::models::user::{UpdateProfile, UserResponse};
use staybook_db::repositories::{SessionRepo, UserRepo};
use staybook_mail::MailMessage;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::auth::{create_auth_response, AuthResponse};
use crate::handlers::deliver_mail;
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::query::PaginationParams;
use crate::state::AppState;

/// Request body for `POST /users/me/email-change`.
#[derive(Debug, Deserialize, Validate)]
pub struct EmailChangeRequest {
    #[validate(email)]
    pub new_email: String,
}

/// Request body for `POST /users/email-change/confirm`.
#[derive(Debug, Deserialize)]
pub struct EmailChangeConfirmRequest {
    pub token: String,
}

/// GET /api/v1/users/me
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(auth_user): RequireAuth,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;
    Ok(Json(user.into()))
}

/// PATCH /api/v1/users/me
pub async fn update_me(
    State(state): State<AppState>,
    RequireAuth(auth_user): RequireAuth,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::update_profile(&state.pool, auth_user.user_id, &input)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;
    Ok(Json(user.into()))
}

/// POST /api/v1/users/me/become-partner
///
/// Grant the partner flag to the authenticated user and reissue tokens so
/// the upgraded role is usable without a re-login. Existing sessions are
/// revoked; only the returned refresh token stays valid.
pub async fn become_partner(
    State(state): State<AppState>,
    RequireAuth(auth_user): RequireAuth,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::set_partner(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;

    SessionRepo::revoke_all_for_user(&state.pool, user.id).await?;

    tracing::info!(user_id = user.id, "Partner status granted");
    let response = create_auth_response(&state, &user).await?;
    Ok(Json(response))
}

/// POST /api/v1/users/me/email-change
///
/// Start an email-change flow. The confirmation token is sent to the NEW
/// address; the old one stays in effect until confirmed.
pub async fn request_email_change(
    State(state): State<AppState>,
    RequireAuth(auth_user): RequireAuth,
    Json(input): Json<EmailChangeRequest>,
) -> AppResult<StatusCode> {
    input.validate()?;

    if UserRepo::find_by_email(&state.pool, &input.new_email)
        .await?
        .is_some()
    {
        return Err(AppError::Domain(DomainError::Conflict(
            "An account with this email already exists".into(),
        )));
    }

    let token = Uuid::new_v4().to_string();
    let updated =
        UserRepo::request_email_change(&state.pool, auth_user.user_id, &input.new_email, &token)
            .await?;
    if !updated {
        return Err(AppError::Domain(DomainError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }));
    }

    deliver_mail(&state, &input.new_email, MailMessage::EmailChange { token }).await;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/users/email-change/confirm
///
/// Complete an email change with the token sent to the new address.
pub async fn confirm_email_change(
    State(state): State<AppState>,
    Json(input): Json<EmailChangeConfirmRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::confirm_email_change(&state.pool, &input.token)
        .await?
        .ok_or_else(|| {
            AppError::Domain(DomainError::Validation(
                "Invalid or already used email-change token".into(),
            ))
        })?;

    tracing::info!(user_id = user.id, "Email address changed");
    Ok(Json(user.into()))
}

/// GET /api/v1/admin/users
///
/// Staff-only paginated listing of all accounts.
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let users = UserRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}
