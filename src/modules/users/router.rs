use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

use super::controller::{delete_user, get_profile};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/delete/{id}", delete(delete_user))
}
