//! DJ profile DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::{ListingQuery, ProfileInput, ProfilePatchInput};
use crate::domain::{DjListing, DjProfile};
use crate::interfaces::http::common::present;
use crate::shared::validations::NumericInput;

/// Profile creation body. Numeric fields accept numbers or numeric strings.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDjProfileRequest {
    #[validate(length(max = 5000, message = "bio must be at most 5000 characters"))]
    pub bio: Option<String>,
    pub genres: Option<Vec<String>>,
    #[schema(value_type = Option<f64>)]
    pub hourly_rate: Option<NumericInput>,
    #[schema(value_type = Option<i32>)]
    pub experience: Option<NumericInput>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub youtube: Option<String>,
    pub tiktok: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub latitude: Option<NumericInput>,
    #[schema(value_type = Option<f64>)]
    pub longitude: Option<NumericInput>,
    #[schema(value_type = Option<i32>)]
    pub radius: Option<NumericInput>,
    pub profile_image: Option<String>,
    pub credentials: Option<Vec<String>>,
}

impl From<CreateDjProfileRequest> for ProfileInput {
    fn from(r: CreateDjProfileRequest) -> Self {
        Self {
            bio: r.bio,
            genres: r.genres,
            hourly_rate: r.hourly_rate,
            experience: r.experience,
            phone: r.phone,
            instagram: r.instagram,
            facebook: r.facebook,
            youtube: r.youtube,
            tiktok: r.tiktok,
            twitter: r.twitter,
            website: r.website,
            city: r.city,
            state: r.state,
            zip_code: r.zip_code,
            latitude: r.latitude,
            longitude: r.longitude,
            radius: r.radius,
            profile_image: r.profile_image,
            credentials: r.credentials,
        }
    }
}

/// Partial update body. Absent keys are left alone; `null` or `""` clears
/// a numeric field.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDjProfileRequest {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<Vec<String>>)]
    pub genres: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<f64>)]
    pub hourly_rate: Option<Option<NumericInput>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub experience: Option<Option<NumericInput>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub instagram: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub facebook: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub youtube: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub tiktok: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub twitter: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub website: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub state: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub zip_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<f64>)]
    pub latitude: Option<Option<NumericInput>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<f64>)]
    pub longitude: Option<Option<NumericInput>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub radius: Option<Option<NumericInput>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub profile_image: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<Vec<String>>)]
    pub credentials: Option<Option<Vec<String>>>,
}

impl From<UpdateDjProfileRequest> for ProfilePatchInput {
    fn from(r: UpdateDjProfileRequest) -> Self {
        Self {
            bio: r.bio,
            genres: r.genres,
            hourly_rate: r.hourly_rate,
            experience: r.experience,
            phone: r.phone,
            instagram: r.instagram,
            facebook: r.facebook,
            youtube: r.youtube,
            tiktok: r.tiktok,
            twitter: r.twitter,
            website: r.website,
            city: r.city,
            state: r.state,
            zip_code: r.zip_code,
            latitude: r.latitude,
            longitude: r.longitude,
            radius: r.radius,
            profile_image: r.profile_image,
            credentials: r.credentials,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DjListingParams {
    /// 1-based page (default 1)
    pub page: Option<u32>,
    /// Page size, 1–100 (default 10)
    pub limit: Option<u32>,
    /// Exact genre membership
    pub genre: Option<String>,
    /// Case-insensitive substring of the city
    pub city: Option<String>,
    pub min_rate: Option<f64>,
    pub max_rate: Option<f64>,
    /// Case-insensitive substring of the bio or the DJ's name
    pub search: Option<String>,
}

impl From<DjListingParams> for ListingQuery {
    fn from(p: DjListingParams) -> Self {
        Self {
            page: p.page,
            limit: p.limit,
            genre: p.genre,
            city: p.city,
            min_rate: p.min_rate,
            max_rate: p.max_rate,
            search: p.search,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DjProfileDto {
    pub id: String,
    pub user_id: String,
    pub bio: Option<String>,
    pub genres: Vec<String>,
    pub hourly_rate: Option<f64>,
    pub experience: Option<i32>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub youtube: Option<String>,
    pub tiktok: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<i32>,
    pub profile_image: Option<String>,
    pub credentials: Vec<String>,
    /// PENDING, VERIFIED, REJECTED or SUSPENDED
    pub status: String,
    pub verification_notes: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub rating: f64,
    pub total_reviews: i32,
    pub total_bookings: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DjProfile> for DjProfileDto {
    fn from(p: DjProfile) -> Self {
        Self {
            status: p.status.as_str().to_string(),
            id: p.id,
            user_id: p.user_id,
            bio: p.bio,
            genres: p.genres,
            hourly_rate: p.hourly_rate,
            experience: p.experience,
            phone: p.phone,
            instagram: p.instagram,
            facebook: p.facebook,
            youtube: p.youtube,
            tiktok: p.tiktok,
            twitter: p.twitter,
            website: p.website,
            city: p.city,
            state: p.state,
            zip_code: p.zip_code,
            latitude: p.latitude,
            longitude: p.longitude,
            radius: p.radius,
            profile_image: p.profile_image,
            credentials: p.credentials,
            verification_notes: p.verification_notes,
            verified_at: p.verified_at,
            rating: p.rating,
            total_reviews: p.total_reviews,
            total_bookings: p.total_bookings,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OwnerDto {
    pub name: Option<String>,
    pub image: Option<String>,
}

/// Profile with its owner's display data
#[derive(Debug, Serialize, ToSchema)]
pub struct DjListingDto {
    #[serde(flatten)]
    pub profile: DjProfileDto,
    pub user: OwnerDto,
}

impl From<DjListing> for DjListingDto {
    fn from(l: DjListing) -> Self {
        Self {
            profile: l.profile.into(),
            user: OwnerDto {
                name: l.owner_name,
                image: l.owner_image,
            },
        }
    }
}
