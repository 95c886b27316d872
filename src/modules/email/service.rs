use arrest_core::AppError;
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::auth::service::generate_verification_code;
use crate::modules::users::service::UserService;
use crate::utils::email::EmailService;

pub struct VerificationEmailService;

impl VerificationEmailService {
    /// Issues a fresh code for an unverified account and mails it. Unknown
    /// or already verified addresses are ignored so callers cannot probe
    /// which emails are registered.
    #[instrument(skip(db, email_service))]
    pub async fn resend(
        db: &PgPool,
        email_service: &EmailService,
        email: &str,
    ) -> Result<(), AppError> {
        let Some(user) = UserService::find_by_email(db, email).await? else {
            tracing::debug!("Verification requested for unknown email");
            return Ok(());
        };

        if user.verified {
            tracing::debug!(user_id = %user.id, "Verification requested for verified user");
            return Ok(());
        }

        let code = generate_verification_code();
        sqlx::query("UPDATE users SET verification_code = $1, updated_at = NOW() WHERE id = $2")
            .bind(&code)
            .bind(user.id)
            .execute(db)
            .await?;

        if let Err(e) = email_service
            .send_verification_code(&user.email, &user.username, &code)
            .await
        {
            tracing::warn!(user_id = %user.id, error = %e.error, "Verification email not sent");
        }

        Ok(())
    }
}
