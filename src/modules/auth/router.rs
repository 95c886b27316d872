use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{login_user, logout, register_user, verify_user};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/registration", post(register_user))
        .route("/verify_user", post(verify_user))
        .route("/login", post(login_user))
        .route("/logout", post(logout))
}
