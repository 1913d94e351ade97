use async_trait::async_trait;

use super::{Booking, BookingStatus, NewBooking};
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, dto: NewBooking) -> DomainResult<Booking>;

    /// Bookings requested by `user_id`, newest first.
    async fn list_for_user(
        &self,
        user_id: &str,
        status: Option<BookingStatus>,
    ) -> DomainResult<Vec<Booking>>;
}
