use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::VerificationToken;
use crate::domain::DomainResult;

#[async_trait]
pub trait VerificationTokenRepository: Send + Sync {
    async fn create(
        &self,
        email: &str,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<VerificationToken>;

    async fn find_by_hash(&self, token_hash: &str) -> DomainResult<Option<VerificationToken>>;

    async fn delete(&self, id: &str) -> DomainResult<()>;

    /// Remove every token whose deadline has passed; returns the count.
    async fn delete_expired(&self, now: DateTime<Utc>) -> DomainResult<u64>;
}
