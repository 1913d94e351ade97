//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` — unified access to all per-aggregate repositories
//! - `DomainResult` — standard result type for domain operations

use super::booking::BookingRepository;
use super::dj_profile::DjProfileRepository;
use super::user::UserRepository;
use super::verification_token::VerificationTokenRepository;
use crate::shared::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let user = repos.users().find_by_email("dj@example.com").await?;
///     let profile = repos.dj_profiles().find_by_user_id(&user.id).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn dj_profiles(&self) -> &dyn DjProfileRepository;
    fn bookings(&self) -> &dyn BookingRepository;
    fn verification_tokens(&self) -> &dyn VerificationTokenRepository;
}
