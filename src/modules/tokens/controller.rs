use arrest_core::{AppError, ErrorResponse};
use arrest_models::auth::{AccessTokenResponse, RefreshTokenRequest, TokenPairResponse};
use axum::{Json, extract::State};
use tracing::instrument;

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::TokenService;

/// Exchange a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/v1.0/token/generate-access-token",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New access token", body = AccessTokenResponse),
        (status = 401, description = "Invalid, expired or revoked refresh token", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Tokens"
)]
#[instrument(skip_all)]
pub async fn generate_access_token(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RefreshTokenRequest>,
) -> Result<Json<AccessTokenResponse>, AppError> {
    let response =
        TokenService::generate_access_token(&state.db, &state.tokens, &dto.refresh_token).await?;
    Ok(Json(response))
}

/// Rotate a refresh token
#[utoipa::path(
    post,
    path = "/v1.0/token/generate-refresh-token",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New token pair; the old refresh token is revoked", body = TokenPairResponse),
        (status = 401, description = "Invalid, expired or revoked refresh token", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Tokens"
)]
#[instrument(skip_all)]
pub async fn generate_refresh_token(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RefreshTokenRequest>,
) -> Result<Json<TokenPairResponse>, AppError> {
    let response =
        TokenService::generate_refresh_token(&state.db, &state.tokens, &dto.refresh_token).await?;
    Ok(Json(response))
}
