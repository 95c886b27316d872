use arrest_core::{AppError, ErrorResponse};
use arrest_models::arrests::{Arrest, CreateArrestRequest};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::ArrestService;

/// Record an arrest
#[utoipa::path(
    post,
    path = "/arrestManagement/create_arrest",
    request_body = CreateArrestRequest,
    responses(
        (status = 201, description = "Arrest recorded", body = Arrest),
        (status = 400, description = "Malformed body or unknown organization code", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "ADMIN role required", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Arrests"
)]
#[instrument(skip(state, dto), fields(user_id = %auth_user.user_id()))]
pub async fn create_arrest(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateArrestRequest>,
) -> Result<(StatusCode, Json<Arrest>), AppError> {
    let arrest = ArrestService::create_arrest(&state.db, auth_user.user_id(), dto).await?;
    Ok((StatusCode::CREATED, Json(arrest)))
}

/// Fetch an arrest by id
#[utoipa::path(
    get,
    path = "/arrestManagement/get_arrest/{id}",
    params(("id" = Uuid, Path, description = "Arrest ID")),
    responses(
        (status = 200, description = "Arrest found", body = Arrest),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "ADMIN or PERSONE role required", body = ErrorResponse),
        (status = 404, description = "Arrest not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Arrests"
)]
#[instrument(skip(state))]
pub async fn get_arrest(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Arrest>, AppError> {
    let arrest = ArrestService::get_arrest(&state.db, id).await?;
    Ok(Json(arrest))
}
