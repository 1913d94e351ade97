//! SMTP delivery of account emails

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::application::ports::{Mailer, VerificationMail};
use crate::config::EmailConfig;
use crate::domain::{DomainError, DomainResult};
use crate::shared::InfraError;

fn mail_err(e: impl std::fmt::Display) -> DomainError {
    InfraError::Mail(e.to_string()).into()
}

/// Mailer backed by an SMTP relay
pub struct SmtpMailer {
    config: EmailConfig,
}

impl SmtpMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Check if email sending is configured
    pub fn is_enabled(&self) -> bool {
        self.config.is_configured()
    }

    async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        html_body: String,
        text_body: String,
    ) -> DomainResult<()> {
        let smtp_host = self
            .config
            .smtp_host
            .as_deref()
            .ok_or_else(|| mail_err("SMTP host not configured"))?;
        let from_address = self
            .config
            .from_address
            .as_deref()
            .ok_or_else(|| mail_err("From address not configured"))?;

        let from: Mailbox = format!("{} <{}>", self.config.from_name, from_address)
            .parse()
            .map_err(mail_err)?;
        let to: Mailbox = to_email.parse().map_err(mail_err)?;

        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body),
                    ),
            )
            .map_err(mail_err)?;

        let mailer = if self.config.smtp_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(smtp_host).map_err(mail_err)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(smtp_host)
        }
        .port(self.config.smtp_port);

        let mailer = match (&self.config.smtp_username, &self.config.smtp_password) {
            (Some(username), Some(password)) => {
                mailer.credentials(Credentials::new(username.clone(), password.clone()))
            }
            _ => mailer,
        };

        mailer.build().send(email).await.map_err(mail_err)?;

        tracing::info!(to = %to_email, subject = %subject, "Email sent");
        Ok(())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_verification(&self, mail: &VerificationMail) -> DomainResult<()> {
        if !self.is_enabled() {
            tracing::warn!(to = %mail.to, "Email not configured, skipping verification email");
            return Err(mail_err("SMTP not configured"));
        }

        self.send_email(
            &mail.to,
            "Verify your email address - Mix Factory",
            render_verification_html(&mail.verify_url, mail.expires_in_hours),
            render_verification_text(&mail.verify_url, mail.expires_in_hours),
        )
        .await
    }
}

fn render_verification_html(verify_url: &str, expires_in_hours: i64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Verify your email</title>
</head>
<body style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
    <h2 style="color: #1e40af;">Welcome to Mix Factory!</h2>
    <p>Thank you for registering. Please verify your email address to activate your account.</p>
    <div style="margin: 30px 0;">
        <a href="{url}" style="background-color: #2563eb; color: white; padding: 12px 30px; text-decoration: none; border-radius: 6px; display: inline-block;">Verify Email Address</a>
    </div>
    <p style="color: #666;">Or copy and paste this link in your browser:</p>
    <p style="color: #2563eb; word-break: break-all;">{url}</p>
    <p style="color: #999; font-size: 12px; margin-top: 30px;">This link will expire in {hours} hours.</p>
    <hr style="border: none; border-top: 1px solid #eee; margin: 30px 0;" />
    <p style="color: #999; font-size: 12px;">If you didn't register for this account, please ignore this email.</p>
</body>
</html>"#,
        url = verify_url,
        hours = expires_in_hours,
    )
}

fn render_verification_text(verify_url: &str, expires_in_hours: i64) -> String {
    format!(
        "Welcome to Mix Factory!\n\n\
         Please verify your email address by opening the link below:\n\n\
         {}\n\n\
         This link will expire in {} hours.\n\n\
         If you didn't register for this account, please ignore this email.\n",
        verify_url, expires_in_hours
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bodies_carry_link_and_expiry() {
        let url = "https://mixfactory.test/api/v1/auth/verify-email?token=abc";
        let html = render_verification_html(url, 24);
        let text = render_verification_text(url, 24);
        assert!(html.contains(url));
        assert!(html.contains("24 hours"));
        assert!(text.contains(url));
    }

    #[tokio::test]
    async fn unconfigured_mailer_reports_failure() {
        let mailer = SmtpMailer::new(EmailConfig::default());
        assert!(!mailer.is_enabled());
        let result = mailer
            .send_verification(&VerificationMail {
                to: "a@example.com".into(),
                verify_url: "http://x".into(),
                expires_in_hours: 24,
            })
            .await;
        assert!(result.is_err());
    }
}
