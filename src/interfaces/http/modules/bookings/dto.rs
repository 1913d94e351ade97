//! Booking DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::BookingInput;
use crate::domain::Booking;
use crate::shared::validations::NumericInput;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(default)]
    pub dj_id: String,
    /// `YYYY-MM-DD`, or an RFC 3339 instant when `eventTime` is omitted
    #[serde(default)]
    pub event_date: String,
    /// `HH:MM` or `HH:MM:SS`, UTC
    pub event_time: Option<String>,
    /// Whole hours, at least 1; fractions are truncated
    #[schema(value_type = Option<f64>)]
    pub event_duration: Option<NumericInput>,
    #[serde(default)]
    #[validate(length(max = 500, message = "eventLocation must be at most 500 characters"))]
    pub event_location: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "eventType must be at most 100 characters"))]
    pub event_type: String,
    #[validate(length(max = 2000, message = "eventNotes must be at most 2000 characters"))]
    pub event_notes: Option<String>,
    #[serde(default)]
    pub contact_email: String,
    pub contact_phone: Option<String>,
}

impl From<CreateBookingRequest> for BookingInput {
    fn from(r: CreateBookingRequest) -> Self {
        Self {
            dj_id: r.dj_id,
            event_date: r.event_date,
            event_time: r.event_time,
            event_duration: r.event_duration,
            event_location: r.event_location,
            event_type: r.event_type,
            event_notes: r.event_notes,
            contact_email: r.contact_email,
            contact_phone: r.contact_phone,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListParams {
    /// PENDING, CONFIRMED, COMPLETED or CANCELLED
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: String,
    pub user_id: String,
    pub dj_id: String,
    pub event_date: DateTime<Utc>,
    pub event_duration: i32,
    pub event_location: String,
    pub event_type: String,
    pub event_notes: Option<String>,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub status: String,
    pub quoted_price: Option<f64>,
    pub final_price: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            status: b.status.as_str().to_string(),
            id: b.id,
            user_id: b.user_id,
            dj_id: b.dj_id,
            event_date: b.event_date,
            event_duration: b.event_duration,
            event_location: b.event_location,
            event_type: b.event_type,
            event_notes: b.event_notes,
            contact_email: b.contact_email,
            contact_phone: b.contact_phone,
            quoted_price: b.quoted_price,
            final_price: b.final_price,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}
