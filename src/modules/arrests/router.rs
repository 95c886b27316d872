use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_arrest, get_arrest};

pub fn init_arrests_router() -> Router<AppState> {
    Router::new()
        .route("/create_arrest", post(create_arrest))
        .route("/get_arrest/{id}", get(get_arrest))
}
