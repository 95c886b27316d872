//! Outgoing account mail.
//!
//! Only one message exists: the six-digit verification code sent after
//! registration and on re-send. When `SMTP_ENABLED` is off the code is logged
//! so local setups can still verify accounts.

use arrest_config::EmailConfig;
use arrest_core::AppError;
use lettre::message::{Mailbox, MultiPart, SinglePart, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::instrument;

/// Rendered verification mail, independent of the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl VerificationEmail {
    pub fn render(sender_name: &str, username: &str, code: &str) -> Self {
        let text = format!(
            "Hello {username},\n\n\
             Use the code {code} to confirm your {sender_name} account.\n\n\
             If you did not sign up you can ignore this message."
        );

        let html = format!(
            r#"<!DOCTYPE html>
<html lang="en">
<body style="font-family: sans-serif; background: #f5f5f5; padding: 24px;">
    <div style="max-width: 520px; margin: 0 auto; background: #fff; border-radius: 6px; padding: 28px;">
        <h2 style="margin-top: 0;">{sender_name}</h2>
        <p>Hello <strong>{username}</strong>,</p>
        <p>Use this code to confirm your account:</p>
        <p style="font-size: 30px; font-weight: bold; letter-spacing: 6px; text-align: center;">{code}</p>
        <p style="color: #777; font-size: 12px;">If you did not sign up you can ignore this message.</p>
    </div>
</body>
</html>"#
        );

        Self {
            subject: format!("{sender_name}: confirm your account"),
            text,
            html,
        }
    }
}

pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Sends the account verification code. With delivery disabled the code
    /// is written to the log instead.
    #[instrument(skip(self, code))]
    pub async fn send_verification_code(
        &self,
        to_email: &str,
        username: &str,
        code: &str,
    ) -> Result<(), AppError> {
        if !self.config.enabled {
            tracing::info!(
                to = %to_email,
                code = %code,
                "SMTP disabled; verification code not emailed"
            );
            return Ok(());
        }

        let mail = VerificationEmail::render(&self.config.from_name, username, code);
        let message = self.build_message(to_email, &mail)?;
        let transport = self.transport()?;

        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| AppError::internal_error(format!("Mail task failed: {e}")))?
            .map_err(|e| AppError::internal_error(format!("SMTP delivery failed: {e}")))?;

        tracing::info!(to = %to_email, "Verification email sent");
        Ok(())
    }

    fn build_message(&self, to_email: &str, mail: &VerificationEmail) -> Result<Message, AppError> {
        let from: Mailbox = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .map_err(|e| AppError::internal_error(format!("Bad sender address: {e}")))?;
        let to: Mailbox = to_email
            .parse()
            .map_err(|e| AppError::internal_error(format!("Bad recipient address: {e}")))?;

        let body = MultiPart::alternative()
            .singlepart(SinglePart::plain(mail.text.clone()))
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_HTML)
                    .body(mail.html.clone()),
            );

        Message::builder()
            .from(from)
            .to(to)
            .subject(mail.subject.as_str())
            .multipart(body)
            .map_err(|e| AppError::internal_error(format!("Could not assemble email: {e}")))
    }

    /// Plain SMTP for local relays without credentials, STARTTLS relay otherwise.
    fn transport(&self) -> Result<SmtpTransport, AppError> {
        let config = &self.config;
        if config.smtp_username.is_empty() {
            return Ok(SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build());
        }

        let relay = SmtpTransport::starttls_relay(&config.smtp_host)
            .map_err(|e| AppError::internal_error(format!("SMTP relay setup failed: {e}")))?;
        Ok(relay
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build())
    }
}
