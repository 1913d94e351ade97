//! DJ profile lifecycle
//!
//! Owners create and patch their own profile; admins review, verify,
//! suspend and maintain rating statistics. Public reads only ever see
//! VERIFIED profiles.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::input::{ProfileInput, ProfilePatchInput};
use crate::application::identity::Principal;
use crate::domain::{
    DjListing, DjProfile, DjProfileFilter, DjStatus, DomainError, DomainResult, RatingChanges,
    RatingStats, RepositoryProvider, StatusChange, UserRole,
};
use crate::shared::{PaginatedResult, PaginationParams};

/// Public directory query as received from clients
#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub genre: Option<String>,
    pub city: Option<String>,
    pub min_rate: Option<f64>,
    pub max_rate: Option<f64>,
    pub search: Option<String>,
}

/// Admin rating edit. Absent fields are left unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatingInput {
    pub rating: Option<f64>,
    pub total_reviews: Option<i64>,
    pub total_bookings: Option<i64>,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clamp_count(value: i64) -> i32 {
    value.clamp(0, i64::from(i32::MAX)) as i32
}

fn profile_not_found(field: &'static str, value: &str) -> DomainError {
    DomainError::not_found("DjProfile", field, value)
}

pub struct DjProfileService {
    repos: Arc<dyn RepositoryProvider>,
}

impl DjProfileService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Owner operations ────────────────────────────────────────

    /// Create the caller's profile and promote a USER to DJ.
    pub async fn create_profile(
        &self,
        owner: &Principal,
        input: ProfileInput,
    ) -> DomainResult<DjProfile> {
        let user = self
            .repos
            .users()
            .find_by_id(&owner.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", &owner.user_id))?;

        let new_profile = input.into_new_profile(&user.id)?;
        let profile = self.repos.dj_profiles().create(new_profile).await?;

        if user.role == UserRole::User {
            self.repos.users().set_role(&user.id, UserRole::Dj).await?;
        }

        info!(user_id = %user.id, dj_id = %profile.id, "DJ profile created");
        Ok(profile)
    }

    pub async fn update_profile(
        &self,
        owner: &Principal,
        patch: ProfilePatchInput,
    ) -> DomainResult<DjProfile> {
        let changes = patch.into_changes()?;
        let profile = self
            .repos
            .dj_profiles()
            .apply_changes(&owner.user_id, changes, Utc::now())
            .await?;

        info!(dj_id = %profile.id, "DJ profile updated");
        Ok(profile)
    }

    pub async fn get_own(&self, owner: &Principal) -> DomainResult<DjProfile> {
        self.repos
            .dj_profiles()
            .find_by_user_id(&owner.user_id)
            .await?
            .ok_or_else(|| profile_not_found("userId", &owner.user_id))
    }

    // ── Public reads ────────────────────────────────────────────

    /// A VERIFIED profile by id. Any other status reads as missing.
    pub async fn get_public(&self, id: &str) -> DomainResult<DjListing> {
        self.repos
            .dj_profiles()
            .find_listing(id)
            .await?
            .filter(|listing| listing.profile.status == DjStatus::Verified)
            .ok_or_else(|| profile_not_found("id", id))
    }

    pub async fn list_public(&self, query: ListingQuery) -> DomainResult<PaginatedResult<DjListing>> {
        if let (Some(min), Some(max)) = (query.min_rate, query.max_rate) {
            if min > max {
                return Err(DomainError::validation("minRate must not exceed maxRate"));
            }
        }

        self.repos
            .dj_profiles()
            .list(DjProfileFilter {
                status: Some(DjStatus::Verified),
                genre: trimmed(query.genre),
                city: trimmed(query.city),
                min_rate: query.min_rate,
                max_rate: query.max_rate,
                search: trimmed(query.search),
                pagination: PaginationParams::new(query.page, query.limit),
            })
            .await
    }

    // ── Admin operations ────────────────────────────────────────

    /// Review queue; PENDING unless another status is requested.
    pub async fn list_admin(
        &self,
        status: Option<&str>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> DomainResult<PaginatedResult<DjListing>> {
        let status = match status.map(str::trim).filter(|s| !s.is_empty()) {
            None => DjStatus::Pending,
            Some(raw) => parse_status(raw)?,
        };

        self.repos
            .dj_profiles()
            .list(DjProfileFilter {
                status: Some(status),
                pagination: PaginationParams::new(page, limit),
                ..Default::default()
            })
            .await
    }

    pub async fn admin_get(&self, id: &str) -> DomainResult<DjListing> {
        self.repos
            .dj_profiles()
            .find_listing(id)
            .await?
            .ok_or_else(|| profile_not_found("id", id))
    }

    pub async fn set_status(
        &self,
        id: &str,
        status: &str,
        notes: Option<String>,
    ) -> DomainResult<DjProfile> {
        let status = parse_status(status)?;
        let profile = self
            .repos
            .dj_profiles()
            .set_status(
                id,
                StatusChange {
                    status,
                    notes: trimmed(notes),
                    decided_at: Utc::now(),
                },
            )
            .await?;

        metrics::counter!("dj_status_changes_total", "status" => status.as_str()).increment(1);
        info!(dj_id = %profile.id, to = %status, "DJ status changed");
        Ok(profile)
    }

    pub async fn get_rating(&self, id: &str) -> DomainResult<RatingStats> {
        let profile = self.find(id).await?;
        Ok(RatingStats {
            rating: profile.rating,
            total_reviews: profile.total_reviews,
            total_bookings: profile.total_bookings,
        })
    }

    pub async fn set_rating(&self, id: &str, input: RatingInput) -> DomainResult<RatingStats> {
        if let Some(rating) = input.rating {
            if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
                return Err(DomainError::validation("Rating must be between 0 and 5"));
            }
        }

        let changes = RatingChanges {
            rating: input.rating,
            total_reviews: input.total_reviews.map(clamp_count),
            total_bookings: input.total_bookings.map(clamp_count),
        };
        let profile = self
            .repos
            .dj_profiles()
            .update_rating(id, changes, Utc::now())
            .await?;
        info!(dj_id = %profile.id, rating = profile.rating, "DJ rating updated");

        Ok(RatingStats {
            rating: profile.rating,
            total_reviews: profile.total_reviews,
            total_bookings: profile.total_bookings,
        })
    }

    async fn find(&self, id: &str) -> DomainResult<DjProfile> {
        self.repos
            .dj_profiles()
            .find_by_id(id)
            .await?
            .ok_or_else(|| profile_not_found("id", id))
    }
}

fn parse_status(raw: &str) -> DomainResult<DjStatus> {
    DjStatus::parse(raw).ok_or_else(|| {
        DomainError::validation("Status must be one of PENDING, VERIFIED, REJECTED, SUSPENDED")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support;
    use crate::shared::validations::NumericInput;

    async fn setup(role: UserRole) -> (DjProfileService, Arc<dyn RepositoryProvider>, Principal) {
        let repos = test_support::repos().await;
        let user = test_support::user(&repos, "dj@example.com", role).await;
        let principal = Principal {
            user_id: user.id,
            email: user.email,
            name: user.name,
            role,
        };
        (DjProfileService::new(repos.clone()), repos, principal)
    }

    fn input() -> ProfileInput {
        ProfileInput {
            bio: Some("Open format".into()),
            genres: Some(vec!["House".into(), "Hip Hop".into()]),
            hourly_rate: Some("75.50".into()),
            city: Some("Chicago".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_promotes_user_to_dj() {
        let (svc, repos, owner) = setup(UserRole::User).await;
        let profile = svc.create_profile(&owner, input()).await.unwrap();
        assert_eq!(profile.status, DjStatus::Pending);
        assert_eq!(profile.hourly_rate, Some(75.5));

        let user = repos.users().find_by_id(&owner.user_id).await.unwrap().unwrap();
        assert_eq!(user.role, UserRole::Dj);
    }

    #[tokio::test]
    async fn admin_owner_keeps_admin_role() {
        let (svc, repos, owner) = setup(UserRole::Admin).await;
        svc.create_profile(&owner, input()).await.unwrap();
        let user = repos.users().find_by_id(&owner.user_id).await.unwrap().unwrap();
        assert_eq!(user.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn second_profile_is_conflict() {
        let (svc, _, owner) = setup(UserRole::User).await;
        svc.create_profile(&owner, input()).await.unwrap();
        let err = svc.create_profile(&owner, input()).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_applies_partial_patch() {
        let (svc, _, owner) = setup(UserRole::User).await;
        svc.create_profile(
            &owner,
            ProfileInput {
                latitude: Some(NumericInput::Number(41.8)),
                ..input()
            },
        )
        .await
        .unwrap();

        let updated = svc
            .update_profile(
                &owner,
                ProfilePatchInput {
                    latitude: Some(Some("".into())),
                    hourly_rate: Some(Some(NumericInput::Number(90.0))),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.latitude, None);
        assert_eq!(updated.hourly_rate, Some(90.0));
        assert_eq!(updated.city.as_deref(), Some("Chicago"));
        assert_eq!(updated.genres, vec!["House", "Hip Hop"]);
    }

    #[tokio::test]
    async fn update_without_profile_is_not_found() {
        let (svc, _, owner) = setup(UserRole::User).await;
        let err = svc
            .update_profile(&owner, ProfilePatchInput::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found_for("DjProfile"));
    }

    #[tokio::test]
    async fn verification_lifecycle() {
        let (svc, _, owner) = setup(UserRole::User).await;
        let profile = svc.create_profile(&owner, input()).await.unwrap();

        assert!(svc.get_public(&profile.id).await.unwrap_err().is_not_found_for("DjProfile"));

        let verified = svc
            .set_status(&profile.id, "VERIFIED", Some("ID checked".into()))
            .await
            .unwrap();
        assert_eq!(verified.status, DjStatus::Verified);
        assert!(verified.verified_at.is_some());
        assert_eq!(verified.verification_notes.as_deref(), Some("ID checked"));

        let public = svc.get_public(&profile.id).await.unwrap();
        assert_eq!(public.owner_name.as_deref(), Some("dj"));

        let suspended = svc.set_status(&profile.id, "SUSPENDED", None).await.unwrap();
        assert_eq!(suspended.verified_at, verified.verified_at);
        assert!(svc.get_public(&profile.id).await.is_err());
    }

    #[tokio::test]
    async fn owner_patch_does_not_undo_verification() {
        let (svc, _, owner) = setup(UserRole::User).await;
        let profile = svc.create_profile(&owner, input()).await.unwrap();

        // The owner loaded the profile while it was still PENDING.
        let seen = svc.get_own(&owner).await.unwrap();
        assert_eq!(seen.status, DjStatus::Pending);
        let verified = svc.set_status(&profile.id, "VERIFIED", None).await.unwrap();

        let updated = svc
            .update_profile(
                &owner,
                ProfilePatchInput {
                    bio: Some(Some("Now with vinyl".into())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, DjStatus::Verified);
        assert_eq!(updated.verified_at, verified.verified_at);
        assert_eq!(updated.bio.as_deref(), Some("Now with vinyl"));
        assert!(svc.get_public(&profile.id).await.is_ok());
    }

    #[tokio::test]
    async fn invalid_status_is_validation_error() {
        let (svc, _, owner) = setup(UserRole::User).await;
        let profile = svc.create_profile(&owner, input()).await.unwrap();
        let err = svc.set_status(&profile.id, "APPROVED", None).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = svc.set_status("missing", "VERIFIED", None).await.unwrap_err();
        assert!(err.is_not_found_for("DjProfile"));
    }

    #[tokio::test]
    async fn listings_split_public_and_admin() {
        let (svc, _, owner) = setup(UserRole::User).await;
        let profile = svc.create_profile(&owner, input()).await.unwrap();

        assert_eq!(svc.list_public(ListingQuery::default()).await.unwrap().total, 0);
        assert_eq!(svc.list_admin(None, None, None).await.unwrap().total, 1);

        svc.set_status(&profile.id, "VERIFIED", None).await.unwrap();
        let public = svc
            .list_public(ListingQuery {
                city: Some("chic".into()),
                genre: Some("House".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(public.total, 1);
        assert_eq!(svc.list_admin(None, None, None).await.unwrap().total, 0);
        assert_eq!(svc.list_admin(Some("VERIFIED"), None, None).await.unwrap().total, 1);
        assert!(svc.list_admin(Some("bogus"), None, None).await.is_err());
    }

    #[tokio::test]
    async fn rating_bounds_and_clamping() {
        let (svc, _, owner) = setup(UserRole::User).await;
        let profile = svc.create_profile(&owner, input()).await.unwrap();

        let err = svc
            .set_rating(
                &profile.id,
                RatingInput {
                    rating: Some(5.5),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let stats = svc
            .set_rating(
                &profile.id,
                RatingInput {
                    rating: Some(4.5),
                    total_reviews: Some(-3),
                    total_bookings: Some(12),
                },
            )
            .await
            .unwrap();
        assert_eq!(
            stats,
            RatingStats {
                rating: 4.5,
                total_reviews: 0,
                total_bookings: 12,
            }
        );
        assert_eq!(svc.get_rating(&profile.id).await.unwrap(), stats);

        let partial = svc
            .set_rating(
                &profile.id,
                RatingInput {
                    total_bookings: Some(13),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(partial.rating, 4.5);
        assert_eq!(partial.total_bookings, 13);

        let err = svc
            .set_rating("missing", RatingInput::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found_for("DjProfile"));
    }
}
