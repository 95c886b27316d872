use anyhow::anyhow;
use arrest_core::AppError;
use axum::http::{HeaderValue, Method, header};
use axum::response::Redirect;
use axum::routing::get;
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::auth::{authorize, jwt_filter};
use crate::modules::arrests::router::init_arrests_router;
use crate::modules::auth::router::init_auth_router;
use crate::modules::email::router::init_email_router;
use crate::modules::tokens::router::init_tokens_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let cors = {
        let allowed_origins: Vec<HeaderValue> = state
            .cors_config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(allowed_origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .allow_credentials(true)
    };

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/v3/api-docs/openapi.json", ApiDoc::openapi()))
        .route(
            "/swagger-ui.html",
            get(|| async { Redirect::permanent("/swagger-ui/") }),
        )
        .nest("/v1.0/auth", init_auth_router())
        .nest("/v1.0/token", init_tokens_router())
        .nest("/v1.0/user", init_users_router())
        .merge(init_email_router())
        .nest("/arrestManagement", init_arrests_router())
        .fallback(route_not_found)
        .with_state(state.clone())
        // Layers run bottom-up: the token filter sees the request before the gate.
        .layer(middleware::from_fn_with_state(state.clone(), authorize))
        .layer(middleware::from_fn_with_state(state, jwt_filter))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware))
}

async fn route_not_found() -> AppError {
    AppError::not_found(anyhow!("Route not found"))
}
