//! Bearer-token filter, route authorization gate and the `AuthUser` extractor.
//!
//! Both middlewares are mounted on the top-level router so they also cover the
//! fallback. The filter must run first:
//!
//! ```ignore
//! router
//!     .layer(middleware::from_fn_with_state(state.clone(), authorize))
//!     .layer(middleware::from_fn_with_state(state.clone(), jwt_filter))
//! ```

use arrest_auth::{AuthenticatedIdentity, TokenError};
use arrest_core::AppError;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use tracing::{debug, warn};

use super::policy::{Decision, DenyReason};
use crate::state::AppState;

/// Attaches an [`AuthenticatedIdentity`] to the request when it carries a
/// valid access token.
///
/// Never rejects: a missing, invalid, expired, revoked or wrong-type token
/// leaves the request anonymous and the gate decides what that means.
pub async fn jwt_filter(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if let Some(Authorization(bearer)) = req.headers().typed_get::<Authorization<Bearer>>() {
        match state.tokens.authenticate(bearer.token()).await {
            Ok(identity) => {
                debug!(user_id = %identity.user_id, "Authenticated request");
                req.extensions_mut().insert(identity);
            }
            Err(TokenError::Invalidated) => {
                warn!(path = %req.uri().path(), "Invalidated token presented");
            }
            Err(e @ (TokenError::Store(_) | TokenError::Encoding(_))) => {
                warn!(error = %e, "Could not validate token; continuing unauthenticated");
            }
            Err(e) => {
                debug!(error = %e, "Ignoring unusable bearer token");
            }
        }
    }

    next.run(req).await
}

/// Checks the request against the route policy.
pub async fn authorize(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = req.extensions().get::<AuthenticatedIdentity>();
    let user_id = identity.map(|i| i.user_id);
    let decision = state
        .policy
        .evaluate(req.uri().path(), req.method(), identity);

    match decision {
        Decision::Allow => Ok(next.run(req).await),
        Decision::Deny(DenyReason::Unauthenticated) => {
            warn!(method = %req.method(), path = %req.uri().path(), "Unauthenticated request denied");
            Err(AppError::unauthorized("Authentication required".to_string()))
        }
        Decision::Deny(DenyReason::Forbidden) => {
            warn!(
                method = %req.method(),
                path = %req.uri().path(),
                user_id = ?user_id,
                "Request denied: missing role"
            );
            Err(AppError::forbidden(
                "Access denied. Missing required role".to_string(),
            ))
        }
    }
}

/// Extractor for the identity attached by [`jwt_filter`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedIdentity);

impl AuthUser {
    pub fn user_id(&self) -> uuid::Uuid {
        self.0.user_id
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthorized("Authentication required".to_string()))
    }
}
