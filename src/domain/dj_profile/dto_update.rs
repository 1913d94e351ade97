use chrono::{DateTime, Utc};

use super::DjStatus;

/// Field-level change in a partial update
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Patch<T> {
    /// Key absent from the request
    #[default]
    Keep,
    /// Key present with an empty value
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }
}

/// Owner-initiated partial update of a DJ profile.
///
/// Only the listed columns are writable by the owner; `Keep` fields are
/// never written, so concurrent admin edits to other columns survive.
#[derive(Debug, Clone, Default)]
pub struct DjProfileChanges {
    pub bio: Patch<String>,
    pub genres: Patch<Vec<String>>,
    pub hourly_rate: Patch<f64>,
    pub experience: Patch<i32>,
    pub phone: Patch<String>,
    pub instagram: Patch<String>,
    pub facebook: Patch<String>,
    pub youtube: Patch<String>,
    pub tiktok: Patch<String>,
    pub twitter: Patch<String>,
    pub website: Patch<String>,
    pub city: Patch<String>,
    pub state: Patch<String>,
    pub zip_code: Patch<String>,
    pub latitude: Patch<f64>,
    pub longitude: Patch<f64>,
    pub radius: Patch<i32>,
    pub profile_image: Patch<String>,
    pub credentials: Patch<Vec<String>>,
}

/// Admin status decision. Touches status, notes and `verified_at` only.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub status: DjStatus,
    /// `None` keeps the stored notes
    pub notes: Option<String>,
    pub decided_at: DateTime<Utc>,
}

impl StatusChange {
    /// New `verified_at` value, if this decision writes one. Leaving
    /// VERIFIED never clears the stamp.
    pub fn verified_at(&self) -> Option<DateTime<Utc>> {
        (self.status == DjStatus::Verified).then_some(self.decided_at)
    }
}

/// Admin rating edit. `None` keeps the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingChanges {
    pub rating: Option<f64>,
    pub total_reviews: Option<i32>,
    pub total_bookings: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_changes_keep_everything() {
        let changes = DjProfileChanges::default();
        assert!(changes.bio.is_keep());
        assert!(changes.genres.is_keep());
        assert!(changes.hourly_rate.is_keep());
        assert!(changes.credentials.is_keep());
    }

    #[test]
    fn verifying_stamps_verified_at() {
        let now = Utc::now();
        let change = StatusChange {
            status: DjStatus::Verified,
            notes: Some("docs ok".into()),
            decided_at: now,
        };
        assert_eq!(change.verified_at(), Some(now));
    }

    #[test]
    fn other_statuses_leave_verified_at_alone() {
        for status in [DjStatus::Pending, DjStatus::Rejected, DjStatus::Suspended] {
            let change = StatusChange {
                status,
                notes: None,
                decided_at: Utc::now(),
            };
            assert_eq!(change.verified_at(), None);
        }
    }
}
