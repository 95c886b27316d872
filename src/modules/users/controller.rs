use arrest_core::{AppError, ErrorResponse};
use arrest_models::users::UserProfile;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::service::UserService;

/// Get the current user's profile
#[utoipa::path(
    get,
    path = "/v1.0/user/profile",
    responses(
        (status = 200, description = "Current user", body = UserProfile),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state), fields(user_id = %auth_user.user_id()))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<UserProfile>, AppError> {
    let profile = UserService::get_profile(&state.db, auth_user.user_id()).await?;
    Ok(Json(profile))
}

/// Delete your own account
#[utoipa::path(
    delete,
    path = "/v1.0/user/delete/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Missing PERSONE role or not your account", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state), fields(user_id = %auth_user.user_id()))]
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    UserService::delete_user(&state.db, auth_user.user_id(), id).await?;
    state
        .tokens
        .invalidate(&auth_user.0.token_id, auth_user.0.expires_at)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
