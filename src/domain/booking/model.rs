//! Booking domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a booking request. Only PENDING is produced today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "CONFIRMED" => Some(Self::Confirmed),
            "COMPLETED" => Some(Self::Completed),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request by a user to engage a DJ for an event
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub dj_id: String,
    pub event_date: DateTime<Utc>,
    /// Whole hours, at least one
    pub event_duration: i32,
    pub event_location: String,
    pub event_type: String,
    pub event_notes: Option<String>,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub status: BookingStatus,
    pub quoted_price: Option<f64>,
    pub final_price: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated booking ready to be stored as PENDING
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: String,
    pub dj_id: String,
    pub event_date: DateTime<Utc>,
    pub event_duration: i32,
    pub event_location: String,
    pub event_type: String,
    pub event_notes: Option<String>,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub quoted_price: Option<f64>,
}
