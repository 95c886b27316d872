use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{generate_access_token, generate_refresh_token};

pub fn init_tokens_router() -> Router<AppState> {
    Router::new()
        .route("/generate-access-token", post(generate_access_token))
        .route("/generate-refresh-token", post(generate_refresh_token))
}
