use arrest_auth::{TokenAuthenticationService, TokenError};
use arrest_core::AppError;
use arrest_models::auth::{AccessTokenResponse, TokenPairResponse};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::service::UserService;

/// Maps a refresh-token failure to 401, or 500 when the fault is ours.
pub fn refresh_rejection(err: TokenError) -> AppError {
    if err.is_rejection() {
        tracing::warn!(error = %err, "Refresh token rejected");
        AppError::unauthorized("Invalid or expired refresh token".to_string())
    } else {
        AppError::internal(err)
    }
}

pub struct TokenService;

impl TokenService {
    pub fn issue_pair(
        tokens: &TokenAuthenticationService,
        user_id: Uuid,
        username: &str,
        roles: Vec<String>,
    ) -> Result<TokenPairResponse, AppError> {
        let access = tokens.issue_access_token(user_id, username, roles)?;
        let refresh = tokens.issue_refresh_token(user_id, username)?;

        Ok(TokenPairResponse {
            access_token: access.token,
            refresh_token: refresh.token,
            token_type: "Bearer".to_string(),
            expires_in: access.expires_in,
        })
    }

    /// Issues a new access token for the owner of `refresh_token`. Roles are
    /// re-read so that changes apply without logging in again.
    #[instrument(skip_all)]
    pub async fn generate_access_token(
        db: &PgPool,
        tokens: &TokenAuthenticationService,
        refresh_token: &str,
    ) -> Result<AccessTokenResponse, AppError> {
        let claims = tokens
            .verify_refresh_token(refresh_token)
            .await
            .map_err(refresh_rejection)?;
        let (user_id, username) = Self::load_subject(db, &claims.sub).await?;

        let roles = UserService::roles_for(db, user_id).await?;
        let access = tokens.issue_access_token(user_id, &username, roles)?;

        Ok(AccessTokenResponse {
            access_token: access.token,
            token_type: "Bearer".to_string(),
            expires_in: access.expires_in,
        })
    }

    /// Rotates a refresh token: the presented one is revoked and a new
    /// access/refresh pair is returned. Each refresh token rotates at most once.
    #[instrument(skip_all)]
    pub async fn generate_refresh_token(
        db: &PgPool,
        tokens: &TokenAuthenticationService,
        refresh_token: &str,
    ) -> Result<TokenPairResponse, AppError> {
        // Verification and revocation are one store operation: a concurrent
        // second use of the same token is rejected here.
        let claims = tokens
            .consume_refresh_token(refresh_token)
            .await
            .map_err(refresh_rejection)?;
        let (user_id, username) = Self::load_subject(db, &claims.sub).await?;

        let roles = UserService::roles_for(db, user_id).await?;
        Self::issue_pair(tokens, user_id, &username, roles)
    }

    async fn load_subject(db: &PgPool, sub: &str) -> Result<(Uuid, String), AppError> {
        let unauthorized = || AppError::unauthorized("Invalid or expired refresh token".to_string());

        let user_id = Uuid::parse_str(sub).map_err(|_| unauthorized())?;
        let user = UserService::find_by_id(db, user_id)
            .await?
            .ok_or_else(unauthorized)?;

        Ok((user.id, user.username))
    }
}
