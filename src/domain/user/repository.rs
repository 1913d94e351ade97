use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{CreateUserDto, User, UserRole};
use crate::domain::DomainResult;

/// Rows removed by [`UserRepository::delete_by_emails`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeletedAccounts {
    /// Bookings requested by the users or made against their profiles
    pub bookings: u64,
    pub dj_profiles: u64,
    pub users: u64,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. A duplicate email yields `DomainError::Conflict`.
    async fn create(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    async fn mark_email_verified(&self, id: &str, at: DateTime<Utc>) -> DomainResult<()>;

    async fn set_role(&self, id: &str, role: UserRole) -> DomainResult<User>;

    /// Insert or refresh the bootstrap admin account keyed by email.
    async fn upsert_admin(&self, email: &str, name: &str, password_hash: &str) -> DomainResult<User>;

    /// Delete the users with the given emails together with their DJ
    /// profiles, verification tokens and every booking on either side.
    async fn delete_by_emails(&self, emails: &[String]) -> DomainResult<DeletedAccounts>;
}
