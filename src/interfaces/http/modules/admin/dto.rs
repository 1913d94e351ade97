//! Admin DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::{CleanupReport, RatingInput};
use crate::domain::RatingStats;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminDjListParams {
    /// Defaults to PENDING
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDjStatusRequest {
    /// PENDING, VERIFIED, REJECTED or SUSPENDED
    #[serde(default)]
    pub status: String,
    #[validate(length(max = 2000, message = "verificationNotes must be at most 2000 characters"))]
    pub verification_notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRatingRequest {
    /// 0 to 5
    pub rating: Option<f64>,
    /// Negative values are stored as 0
    pub total_reviews: Option<i64>,
    /// Negative values are stored as 0
    pub total_bookings: Option<i64>,
}

impl From<UpdateRatingRequest> for RatingInput {
    fn from(r: UpdateRatingRequest) -> Self {
        Self {
            rating: r.rating,
            total_reviews: r.total_reviews,
            total_bookings: r.total_bookings,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingDto {
    pub dj_id: String,
    pub rating: f64,
    pub total_reviews: i32,
    pub total_bookings: i32,
}

impl RatingDto {
    pub fn new(dj_id: String, stats: RatingStats) -> Self {
        Self {
            dj_id,
            rating: stats.rating,
            total_reviews: stats.total_reviews,
            total_bookings: stats.total_bookings,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RoleFixRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    /// USER, DJ or ADMIN
    pub role: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CleanupRequest {
    #[validate(length(min = 1, message = "at least one email is required"))]
    pub emails: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCounts {
    pub bookings: u64,
    pub dj_profiles: u64,
    pub users: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CleanupResponse {
    pub deleted: DeletedCounts,
}

impl From<CleanupReport> for CleanupResponse {
    fn from(r: CleanupReport) -> Self {
        Self {
            deleted: DeletedCounts {
                bookings: r.bookings,
                dj_profiles: r.dj_profiles,
                users: r.users,
            },
        }
    }
}
