use arrest_core::{AppError, ErrorResponse};
use arrest_models::auth::{MessageResponse, ResendVerificationRequest};
use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use crate::state::AppState;
use crate::utils::email::EmailService;
use crate::validator::ValidatedJson;

use super::service::VerificationEmailService;

/// Re-send the account verification code
#[utoipa::path(
    post,
    path = "/v1.0/email",
    request_body = ResendVerificationRequest,
    responses(
        (status = 202, description = "A code was sent if the account exists and is unverified", body = MessageResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Email"
)]
#[instrument(skip_all)]
pub async fn resend_verification(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ResendVerificationRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let email_service = EmailService::new(state.email_config.clone());
    VerificationEmailService::resend(&state.db, &email_service, &dto.email).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse {
            message: "If the account exists and is unverified, a new code has been sent."
                .to_string(),
        }),
    ))
}
