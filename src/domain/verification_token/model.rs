use chrono::{DateTime, Utc};

/// Single-use email verification token. Only the SHA-256 digest of the
/// token handed to the user is stored.
#[derive(Debug, Clone)]
pub struct VerificationToken {
    pub id: String,
    pub email: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl VerificationToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
