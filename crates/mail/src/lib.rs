//! Transactional email delivery via SMTP.
//!
//! [`Mailer`] wraps the `lettre` async SMTP transport to send the plain-text
//! messages the account and booking flows need. Configuration is loaded from
//! environment variables; if `SMTP_HOST` is not set, [`MailConfig::from_env`]
//! returns `None` and callers skip delivery (logging the token instead, which
//! keeps local development workable without an SMTP server).

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// MailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@staybook.local";

/// Configuration for the SMTP delivery service.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl MailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable        | Required | Default                   |
    /// |-----------------|----------|---------------------------|
    /// | `SMTP_HOST`     | yes      | --                        |
    /// | `SMTP_PORT`     | no       | `587`                     |
    /// | `SMTP_FROM`     | no       | `noreply@staybook.local`  |
    /// | `SMTP_USER`     | no       | --                        |
    /// | `SMTP_PASSWORD` | no       | --                        |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// MailMessage
// ---------------------------------------------------------------------------

/// The transactional messages the platform sends.
#[derive(Debug, Clone)]
pub enum MailMessage {
    /// Sign-up confirmation carrying the activation token.
    Activation { token: String },
    /// Password-reset token.
    PasswordReset { token: String },
    /// Email-change confirmation token, sent to the new address.
    EmailChange { token: String },
    /// Receipt sent after a booking is confirmed as paid.
    BookingPaid { reference_code: String },
}

impl MailMessage {
    fn subject(&self) -> &'static str {
        match self {
            MailMessage::Activation { .. } => "[staybook] Confirm your account",
            MailMessage::PasswordReset { .. } => "[staybook] Reset your password",
            MailMessage::EmailChange { .. } => "[staybook] Confirm your new email address",
            MailMessage::BookingPaid { .. } => "[staybook] Booking confirmed",
        }
    }

    fn body(&self) -> String {
        match self {
            MailMessage::Activation { token } => format!(
                "Welcome to staybook!\n\n\
                 Confirm your account with this token: {token}\n"
            ),
            MailMessage::PasswordReset { token } => format!(
                "A password reset was requested for your account.\n\n\
                 Reset token: {token}\n\n\
                 If you did not request this, you can ignore this message.\n"
            ),
            MailMessage::EmailChange { token } => format!(
                "Confirm your new email address with this token: {token}\n"
            ),
            MailMessage::BookingPaid { reference_code } => format!(
                "Your booking is confirmed.\n\n\
                 Reference code: {reference_code}\n"
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Mailer
// ---------------------------------------------------------------------------

/// Sends transactional emails via SMTP.
pub struct Mailer {
    config: MailConfig,
}

impl Mailer {
    /// Create a new mailer with the given configuration.
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    /// Send a message to the specified address.
    pub async fn send(&self, to_email: &str, message: &MailMessage) -> Result<(), MailError> {
        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(message.subject())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body())
            .map_err(|e| MailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(to = to_email, subject = message.subject(), "Email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        std::env::remove_var("SMTP_HOST");
        assert!(MailConfig::from_env().is_none());
    }

    #[test]
    fn activation_body_contains_token() {
        let msg = MailMessage::Activation {
            token: "tok-123".into(),
        };
        assert!(msg.body().contains("tok-123"));
        assert!(msg.subject().contains("Confirm"));
    }

    #[test]
    fn mail_error_display_build() {
        let err = MailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }
}
