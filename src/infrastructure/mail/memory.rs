//! In-memory mailer for development and testing

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{Mailer, VerificationMail};
use crate::domain::{DomainError, DomainResult};

/// Records every mail instead of delivering it
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<VerificationMail>>,
    fail: AtomicBool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose every send fails
    pub fn failing() -> Self {
        let mailer = Self::default();
        mailer.fail.store(true, Ordering::SeqCst);
        mailer
    }

    pub fn sent(&self) -> Vec<VerificationMail> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }

    /// Token carried by the most recent verification link
    pub fn last_token(&self) -> Option<String> {
        self.sent()
            .last()
            .and_then(|mail| mail.verify_url.split("token=").nth(1).map(str::to_string))
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_verification(&self, mail: &VerificationMail) -> DomainResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::Internal("simulated mail failure".into()));
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(mail.clone());
        }
        Ok(())
    }
}
