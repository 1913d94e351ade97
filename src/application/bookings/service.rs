//! Booking service — requests against verified DJs

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::info;

use crate::application::identity::Principal;
use crate::domain::{
    Booking, BookingStatus, DomainError, DomainResult, NewBooking, RepositoryProvider,
};
use crate::shared::validations::{is_basic_email, parse_i32, required, NumericInput};

/// Booking request as submitted by the client
#[derive(Debug, Clone, Default)]
pub struct BookingInput {
    pub dj_id: String,
    /// `YYYY-MM-DD`, or RFC 3339 when no time is given
    pub event_date: String,
    /// `HH:MM` or `HH:MM:SS`
    pub event_time: Option<String>,
    /// Hours; fractions are truncated
    pub event_duration: Option<NumericInput>,
    pub event_location: String,
    pub event_type: String,
    pub event_notes: Option<String>,
    pub contact_email: String,
    pub contact_phone: Option<String>,
}

/// Combine a calendar date and optional wall-clock time into a UTC instant.
pub fn parse_event_instant(date: &str, time: Option<&str>) -> DomainResult<DateTime<Utc>> {
    let date = date.trim();
    let time = time.map(str::trim).filter(|t| !t.is_empty());

    if time.is_none() {
        if let Ok(instant) = DateTime::parse_from_rfc3339(date) {
            return Ok(instant.with_timezone(&Utc));
        }
    }

    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| DomainError::validation("eventDate must be YYYY-MM-DD"))?;

    let at = match time {
        None => NaiveTime::MIN,
        Some(t) => NaiveTime::parse_from_str(t, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
            .map_err(|_| DomainError::validation("eventTime must be HH:MM or HH:MM:SS"))?,
    };

    Ok(day.and_time(at).and_utc())
}

fn parse_duration(input: Option<&NumericInput>) -> DomainResult<i32> {
    let hours = match input {
        Some(raw) => parse_i32("eventDuration", raw)?,
        None => None,
    };
    match hours {
        Some(h) if h >= 1 => Ok(h),
        _ => Err(DomainError::validation(
            "eventDuration must be at least 1 hour",
        )),
    }
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Request a booking. The DJ must exist and be VERIFIED.
    pub async fn create_booking(
        &self,
        requester: &Principal,
        input: BookingInput,
    ) -> DomainResult<Booking> {
        let dj_id = required("djId", &input.dj_id)?;

        let dj = self
            .repos
            .dj_profiles()
            .find_by_id(&dj_id)
            .await?
            .ok_or_else(|| DomainError::not_found("DjProfile", "id", &dj_id))?;

        if !dj.status.is_bookable() {
            return Err(DomainError::PreconditionFailed(format!(
                "DJ is not verified (status {})",
                dj.status
            )));
        }

        let event_date = parse_event_instant(&input.event_date, input.event_time.as_deref())?;
        let event_duration = parse_duration(input.event_duration.as_ref())?;
        let event_location = required("eventLocation", &input.event_location)?;
        let event_type = required("eventType", &input.event_type)?;
        let contact_email = required("contactEmail", &input.contact_email)?;
        if !is_basic_email(&contact_email) {
            return Err(DomainError::validation("contactEmail is not a valid email"));
        }

        let booking = self
            .repos
            .bookings()
            .create(NewBooking {
                user_id: requester.user_id.clone(),
                dj_id: dj.id.clone(),
                event_date,
                event_duration,
                event_location,
                event_type,
                event_notes: optional_text(input.event_notes),
                contact_email,
                contact_phone: optional_text(input.contact_phone),
                quoted_price: dj.quote(event_duration),
            })
            .await?;

        metrics::counter!("bookings_created_total").increment(1);
        info!(
            booking_id = %booking.id,
            user_id = %booking.user_id,
            dj_id = %booking.dj_id,
            "Booking requested"
        );
        Ok(booking)
    }

    /// The caller's bookings, newest first.
    pub async fn list_bookings(
        &self,
        requester: &Principal,
        status: Option<&str>,
    ) -> DomainResult<Vec<Booking>> {
        let status = match status.map(str::trim).filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => Some(BookingStatus::parse(raw).ok_or_else(|| {
                DomainError::validation(
                    "Status must be one of PENDING, CONFIRMED, COMPLETED, CANCELLED",
                )
            })?),
        };

        self.repos
            .bookings()
            .list_for_user(&requester.user_id, status)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support;
    use crate::domain::{DjProfile, DjStatus, NewDjProfile, StatusChange, UserRole};
    use chrono::{Datelike, Timelike};

    struct Fixture {
        svc: BookingService,
        repos: Arc<dyn RepositoryProvider>,
        client: Principal,
        dj: DjProfile,
    }

    async fn fixture(status: DjStatus, hourly_rate: Option<f64>) -> Fixture {
        let repos = test_support::repos().await;
        let dj_user = test_support::user(&repos, "dj@example.com", UserRole::Dj).await;
        let mut dj = repos
            .dj_profiles()
            .create(NewDjProfile {
                user_id: dj_user.id,
                hourly_rate,
                ..Default::default()
            })
            .await
            .unwrap();
        if status != DjStatus::Pending {
            dj = repos
                .dj_profiles()
                .set_status(
                    &dj.id,
                    StatusChange {
                        status,
                        notes: None,
                        decided_at: Utc::now(),
                    },
                )
                .await
                .unwrap();
        }

        let client = test_support::user(&repos, "client@example.com", UserRole::User).await;
        Fixture {
            svc: BookingService::new(repos.clone()),
            repos,
            client: Principal {
                user_id: client.id,
                email: client.email,
                name: client.name,
                role: UserRole::User,
            },
            dj,
        }
    }

    fn request(dj_id: &str) -> BookingInput {
        BookingInput {
            dj_id: dj_id.into(),
            event_date: "2030-06-14".into(),
            event_time: Some("19:30".into()),
            event_duration: Some(NumericInput::Number(4.0)),
            event_location: "Riverside Hall".into(),
            event_type: "Wedding".into(),
            event_notes: None,
            contact_email: "client@example.com".into(),
            contact_phone: None,
        }
    }

    #[test]
    fn event_instant_forms() {
        let at = parse_event_instant("2030-06-14", Some("19:30")).unwrap();
        assert_eq!((at.year(), at.month(), at.day()), (2030, 6, 14));
        assert_eq!((at.hour(), at.minute()), (19, 30));

        let with_secs = parse_event_instant("2030-06-14", Some("07:05:09")).unwrap();
        assert_eq!(with_secs.second(), 9);

        let rfc = parse_event_instant("2030-06-14T18:00:00+02:00", None).unwrap();
        assert_eq!(rfc.hour(), 16);

        let midnight = parse_event_instant("2030-06-14", None).unwrap();
        assert_eq!(midnight.hour(), 0);

        assert!(parse_event_instant("14/06/2030", None).is_err());
        assert!(parse_event_instant("2030-06-14", Some("7pm")).is_err());
    }

    #[test]
    fn duration_truncates_and_requires_an_hour() {
        assert_eq!(parse_duration(Some(&NumericInput::Number(2.9))).unwrap(), 2);
        assert_eq!(parse_duration(Some(&"3".into())).unwrap(), 3);
        assert!(parse_duration(Some(&NumericInput::Number(0.5))).is_err());
        assert!(parse_duration(Some(&"".into())).is_err());
        assert!(parse_duration(None).is_err());
    }

    #[tokio::test]
    async fn booking_unverified_dj_is_precondition_failure() {
        for status in [DjStatus::Pending, DjStatus::Rejected, DjStatus::Suspended] {
            let fx = fixture(status, Some(100.0)).await;
            assert_eq!(fx.dj.status, status);
            let err = fx
                .svc
                .create_booking(&fx.client, request(&fx.dj.id))
                .await
                .unwrap_err();
            assert!(
                matches!(err, DomainError::PreconditionFailed(_)),
                "{} DJ should not be bookable, got {:?}",
                status,
                err
            );
            assert!(fx
                .svc
                .list_bookings(&fx.client, None)
                .await
                .unwrap()
                .is_empty());
        }
    }

    #[tokio::test]
    async fn suspending_a_verified_dj_stops_new_bookings() {
        let fx = fixture(DjStatus::Verified, Some(50.0)).await;
        fx.svc
            .create_booking(&fx.client, request(&fx.dj.id))
            .await
            .unwrap();

        fx.repos
            .dj_profiles()
            .set_status(
                &fx.dj.id,
                StatusChange {
                    status: DjStatus::Suspended,
                    notes: Some("chargebacks".into()),
                    decided_at: Utc::now(),
                },
            )
            .await
            .unwrap();

        let err = fx
            .svc
            .create_booking(&fx.client, request(&fx.dj.id))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::PreconditionFailed(_)));
        assert_eq!(fx.svc.list_bookings(&fx.client, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn booking_missing_dj_is_not_found() {
        let fx = fixture(DjStatus::Verified, None).await;
        let err = fx
            .svc
            .create_booking(&fx.client, request("nope"))
            .await
            .unwrap_err();
        assert!(err.is_not_found_for("DjProfile"));
    }

    #[tokio::test]
    async fn booking_verified_dj_is_pending_with_quote() {
        let fx = fixture(DjStatus::Verified, Some(75.5)).await;
        let booking = fx
            .svc
            .create_booking(&fx.client, request(&fx.dj.id))
            .await
            .unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.user_id, fx.client.user_id);
        assert_eq!(booking.event_duration, 4);
        assert_eq!(booking.quoted_price, Some(302.0));
    }

    #[tokio::test]
    async fn booking_without_rate_has_no_quote() {
        let fx = fixture(DjStatus::Verified, None).await;
        let booking = fx
            .svc
            .create_booking(&fx.client, request(&fx.dj.id))
            .await
            .unwrap();
        assert_eq!(booking.quoted_price, None);
    }

    #[tokio::test]
    async fn booking_validates_fields() {
        let fx = fixture(DjStatus::Verified, None).await;

        let mut bad_email = request(&fx.dj.id);
        bad_email.contact_email = "nope".into();
        assert!(matches!(
            fx.svc.create_booking(&fx.client, bad_email).await,
            Err(DomainError::Validation(_))
        ));

        let mut no_location = request(&fx.dj.id);
        no_location.event_location = " ".into();
        assert!(matches!(
            fx.svc.create_booking(&fx.client, no_location).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn list_is_scoped_to_requester() {
        let fx = fixture(DjStatus::Verified, None).await;
        fx.svc
            .create_booking(&fx.client, request(&fx.dj.id))
            .await
            .unwrap();

        let other = test_support::user(&fx.repos, "other@example.com", UserRole::User).await;
        let other = Principal {
            user_id: other.id,
            email: other.email,
            name: None,
            role: UserRole::User,
        };

        assert_eq!(fx.svc.list_bookings(&fx.client, None).await.unwrap().len(), 1);
        assert!(fx.svc.list_bookings(&other, None).await.unwrap().is_empty());
        assert_eq!(
            fx.svc
                .list_bookings(&fx.client, Some("PENDING"))
                .await
                .unwrap()
                .len(),
            1
        );
        assert!(fx
            .svc
            .list_bookings(&fx.client, Some("CONFIRMED"))
            .await
            .unwrap()
            .is_empty());
        assert!(fx.svc.list_bookings(&fx.client, Some("LATE")).await.is_err());
    }
}
