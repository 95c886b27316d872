use arrest_auth::{AuthenticatedIdentity, TokenAuthenticationService, roles};
use arrest_core::{AppError, hash_password, verify_password};
use arrest_models::auth::{LoginRequest, LoginResponse, RegisterRequest, VerifyUserRequest};
use arrest_models::users::{User, UserProfile};
use rand::Rng;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::tokens::service::{TokenService, refresh_rejection};
use crate::modules::users::service::UserService;
use crate::utils::email::EmailService;

/// Six-digit code mailed to new accounts.
pub fn generate_verification_code() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

pub struct AuthService;

impl AuthService {
    /// Creates an unverified `PERSONE` account and mails its verification code.
    #[instrument(skip(db, email_service, dto), fields(username = %dto.username))]
    pub async fn register_user(
        db: &PgPool,
        email_service: &EmailService,
        dto: RegisterRequest,
    ) -> Result<UserProfile, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
        .bind(&dto.username)
        .bind(&dto.email)
        .fetch_one(db)
        .await?;

        if taken {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Username or email already exists"
            )));
        }

        let hashed_password = hash_password(&dto.password)?;
        let code = generate_verification_code();

        let mut tx = db.begin().await?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, email, password, verified, verification_code)
             VALUES ($1, $2, $3, $4, false, $5)
             RETURNING id, username, email, password, verified, verification_code, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(&code)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict(anyhow::anyhow!("Username or email already exists"))
            }
            other => AppError::database(other),
        })?;

        sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2)")
            .bind(user.id)
            .bind(roles::PERSONE)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        if let Err(e) = email_service
            .send_verification_code(&user.email, &user.username, &code)
            .await
        {
            tracing::warn!(user_id = %user.id, error = %e.error, "Verification email not sent");
        }

        tracing::info!(user_id = %user.id, "User registered");
        Ok(UserProfile::new(user, vec![roles::PERSONE.to_string()]))
    }

    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn verify_user(db: &PgPool, dto: VerifyUserRequest) -> Result<(), AppError> {
        let invalid = || AppError::bad_request(anyhow::anyhow!("Invalid verification code"));

        let user = UserService::find_by_email(db, &dto.email)
            .await?
            .ok_or_else(invalid)?;

        if user.verified {
            return Ok(());
        }

        if user.verification_code.as_deref() != Some(dto.code.as_str()) {
            return Err(invalid());
        }

        sqlx::query(
            "UPDATE users SET verified = true, verification_code = NULL, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(user.id)
        .execute(db)
        .await?;

        tracing::info!(user_id = %user.id, "User verified");
        Ok(())
    }

    #[instrument(skip(db, tokens, dto), fields(username = %dto.username))]
    pub async fn login_user(
        db: &PgPool,
        tokens: &TokenAuthenticationService,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let invalid = || AppError::unauthorized("Invalid username or password".to_string());

        let user = UserService::find_by_username(db, &dto.username)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(&dto.password, &user.password)? {
            return Err(invalid());
        }

        if !user.verified {
            return Err(AppError::forbidden("Account is not verified".to_string()));
        }

        let roles = UserService::roles_for(db, user.id).await?;
        let pair = TokenService::issue_pair(tokens, user.id, &user.username, roles.clone())?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(LoginResponse {
            tokens: pair,
            user: UserProfile::new(user, roles),
        })
    }

    /// Revokes the caller's access token and, when it belongs to the same
    /// user, the refresh token passed alongside it. A rejected refresh token
    /// leaves both tokens untouched.
    #[instrument(skip_all, fields(user_id = %identity.user_id))]
    pub async fn logout(
        tokens: &TokenAuthenticationService,
        identity: &AuthenticatedIdentity,
        refresh_token: Option<&str>,
    ) -> Result<(), AppError> {
        let refresh = match refresh_token {
            Some(refresh_token) => {
                let claims = tokens
                    .verify_refresh_token(refresh_token)
                    .await
                    .map_err(refresh_rejection)?;

                if claims.sub != identity.user_id.to_string() {
                    return Err(AppError::forbidden(
                        "Refresh token belongs to another user".to_string(),
                    ));
                }

                let expires_at = chrono::DateTime::from_timestamp(claims.exp, 0)
                    .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Invalid token expiry")))?;
                Some((claims.jti, expires_at))
            }
            None => None,
        };

        tokens
            .invalidate(&identity.token_id, identity.expires_at)
            .await?;
        if let Some((jti, expires_at)) = refresh {
            tokens.invalidate(&jti, expires_at).await?;
        }

        tracing::info!("User logged out");
        Ok(())
    }
}
