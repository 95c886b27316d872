use arrest_core::{AppError, ErrorResponse};
use arrest_models::auth::{
    LoginRequest, LoginResponse, LogoutRequest, MessageResponse, RegisterRequest,
    VerifyUserRequest,
};
use arrest_models::users::UserProfile;
use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::email::EmailService;
use crate::validator::ValidatedJson;

use super::service::AuthService;

/// Register a new account
#[utoipa::path(
    post,
    path = "/v1.0/auth/registration",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created; verification code sent", body = UserProfile),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 409, description = "Username or email already exists", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserProfile>), AppError> {
    let email_service = EmailService::new(state.email_config.clone());
    let profile = AuthService::register_user(&state.db, &email_service, dto).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Confirm an account with the emailed code
#[utoipa::path(
    post,
    path = "/v1.0/auth/verify_user",
    request_body = VerifyUserRequest,
    responses(
        (status = 200, description = "Account verified", body = MessageResponse),
        (status = 400, description = "Invalid verification code", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn verify_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<VerifyUserRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::verify_user(&state.db, dto).await?;
    Ok(Json(MessageResponse {
        message: "Account verified".to_string(),
    }))
}

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/v1.0/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Account not verified", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login_user(&state.db, &state.tokens, dto).await?;
    Ok(Json(response))
}

/// Revoke the current access token (and optionally a refresh token)
#[utoipa::path(
    post,
    path = "/v1.0/auth/logout",
    request_body(content = LogoutRequest, description = "Optional refresh token to revoke"),
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Refresh token belongs to another user", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(user_id = %auth_user.user_id()))]
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
    body: Option<Json<LogoutRequest>>,
) -> Result<StatusCode, AppError> {
    let Json(body) = body.unwrap_or_default();
    AuthService::logout(&state.tokens, &auth_user.0, body.refresh_token.as_deref()).await?;
    Ok(StatusCode::NO_CONTENT)
}
