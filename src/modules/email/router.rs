use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::resend_verification;

pub fn init_email_router() -> Router<AppState> {
    Router::new().route("/v1.0/email", post(resend_verification))
}
