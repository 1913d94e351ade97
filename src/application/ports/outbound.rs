//! Outbound ports — interfaces to side-effecting services
//!
//! [`Mailer`] decouples the identity use-cases from the mail transport.
//! The production implementation is
//! [`SmtpMailer`](crate::infrastructure::mail::SmtpMailer); tests use an
//! in-memory recorder.

use async_trait::async_trait;

use crate::domain::DomainResult;

/// Verification mail handed to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationMail {
    pub to: String,
    /// Absolute link the recipient follows to verify
    pub verify_url: String,
    pub expires_in_hours: i64,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver the mail. `Err` means the message was not handed to the relay.
    async fn send_verification(&self, mail: &VerificationMail) -> DomainResult<()>;
}
