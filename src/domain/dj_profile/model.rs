//! DJ profile domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Verification status of a DJ profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DjStatus {
    /// Submitted, awaiting admin review
    #[default]
    Pending,
    /// Approved by an admin; publicly listed and bookable
    Verified,
    Rejected,
    Suspended,
}

impl DjStatus {
    pub const ALL: [DjStatus; 4] = [
        DjStatus::Pending,
        DjStatus::Verified,
        DjStatus::Rejected,
        DjStatus::Suspended,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Verified => "VERIFIED",
            Self::Rejected => "REJECTED",
            Self::Suspended => "SUSPENDED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    pub fn is_bookable(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

impl std::fmt::Display for DjStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service-provider record a DJ maintains
#[derive(Debug, Clone, PartialEq)]
pub struct DjProfile {
    pub id: String,
    pub user_id: String,
    pub bio: Option<String>,
    pub genres: Vec<String>,
    pub hourly_rate: Option<f64>,
    /// Years of experience
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
    /// Travel radius
    pub radius: Option<i32>,
    pub profile_image: Option<String>,
    pub credentials: Vec<String>,
    pub status: DjStatus,
    pub verification_notes: Option<String>,
    /// Stamped on every transition to VERIFIED; never cleared.
    pub verified_at: Option<DateTime<Utc>>,
    pub rating: f64,
    pub total_reviews: i32,
    pub total_bookings: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DjProfile {
    /// Price estimate for an engagement of `hours`, if the DJ has a rate.
    pub fn quote(&self, hours: i32) -> Option<f64> {
        self.hourly_rate.map(|rate| rate * f64::from(hours))
    }
}

/// Profile joined with its owner's display data
#[derive(Debug, Clone)]
pub struct DjListing {
    pub profile: DjProfile,
    pub owner_name: Option<String>,
    pub owner_image: Option<String>,
}

/// Admin-maintained rating statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingStats {
    pub rating: f64,
    pub total_reviews: i32,
    pub total_bookings: i32,
}
