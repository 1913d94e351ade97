//! DJ profile repository interface

use async_trait::async_trait;

use chrono::{DateTime, Utc};

use super::{
    DjListing, DjProfile, DjProfileChanges, DjProfileFilter, NewDjProfile, RatingChanges,
    StatusChange,
};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait DjProfileRepository: Send + Sync {
    /// Insert a PENDING profile. A second profile for the same user yields
    /// `DomainError::Conflict`.
    async fn create(&self, dto: NewDjProfile) -> DomainResult<DjProfile>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<DjProfile>>;
    async fn find_by_user_id(&self, user_id: &str) -> DomainResult<Option<DjProfile>>;

    /// Profile with its owner's display data
    async fn find_listing(&self, id: &str) -> DomainResult<Option<DjListing>>;

    /// Write the owner's changed columns on the profile owned by `user_id`.
    /// Status, verification and rating columns are never written here.
    async fn apply_changes(
        &self,
        user_id: &str,
        changes: DjProfileChanges,
        now: DateTime<Utc>,
    ) -> DomainResult<DjProfile>;

    /// Write only the status columns of profile `id`.
    async fn set_status(&self, id: &str, change: StatusChange) -> DomainResult<DjProfile>;

    /// Write only the supplied rating columns of profile `id`.
    async fn update_rating(
        &self,
        id: &str,
        changes: RatingChanges,
        now: DateTime<Utc>,
    ) -> DomainResult<DjProfile>;

    /// Ordered by rating desc, then newest first.
    async fn list(&self, filter: DjProfileFilter) -> DomainResult<PaginatedResult<DjListing>>;
}
