//! Email service for account notifications

use lettre::{
    message::{header::ContentType, Mailbox, Message, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};
use std::str::FromStr;

use crate::{
    config::EmailConfig,
    error::{AppError, AppResult},
};

#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Welcome mail sent right after signup
    pub async fn send_welcome(&self, to: &str, name: &str) -> AppResult<()> {
        let subject = "Welcome to ReadNest";
        let body = format!(
            r#"
Hi {name},

Welcome to ReadNest! Your account has been created and is awaiting approval.

You will receive another email once a librarian has reviewed your request.
"#,
            name = name
        );

        self.send_email(to, subject, &body).await
    }

    /// Notification that the account was approved
    pub async fn send_account_approved(&self, to: &str, name: &str) -> AppResult<()> {
        let subject = "Your ReadNest account has been approved";
        let body = format!(
            r#"
Hi {name},

Good news: your ReadNest account has been approved. You can now log in and
start borrowing books from the library.
"#,
            name = name
        );

        self.send_email(to, subject, &body).await
    }

    /// Notification that the account was rejected
    pub async fn send_account_rejected(&self, to: &str, name: &str) -> AppResult<()> {
        let subject = "Your ReadNest account request";
        let body = format!(
            r#"
Hi {name},

Unfortunately your ReadNest account request could not be approved.

If you believe this is a mistake, please contact the library staff.
"#,
            name = name
        );

        self.send_email(to, subject, &body).await
    }

    /// Generic email sending function
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let from_name = self.config.smtp_from_name.as_deref().unwrap_or("ReadNest");
        let from_mailbox = Mailbox::from_str(&format!("{} <{}>", from_name, self.config.smtp_from))
            .map_err(|e| AppError::Internal(format!("Invalid from address: {}", e)))?;

        let to_mailbox = Mailbox::from_str(to)
            .map_err(|e| AppError::Internal(format!("Invalid to address: {}", e)))?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(format!(
                                r#"<html><body><pre>{}</pre></body></html>"#,
                                body.replace("\n", "<br>")
                            )),
                    ),
            )
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))?;

        let mailer_builder = if self.config.smtp_use_tls {
            SmtpTransport::starttls_relay(&self.config.smtp_host)
                .map_err(|e| AppError::Internal(format!("Failed to create SMTP transport: {}", e)))?
        } else {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
        }
        .port(self.config.smtp_port);

        let mailer_builder = if let (Some(username), Some(password)) =
            (&self.config.smtp_username, &self.config.smtp_password)
        {
            mailer_builder.credentials(Credentials::new(username.clone(), password.clone()))
        } else {
            mailer_builder
        };

        let mailer = mailer_builder.build();

        mailer
            .send(&email)
            .map_err(|e| AppError::Internal(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}
