use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{Booking, BookingRepository, BookingStatus, DomainResult, NewBooking};
use crate::infrastructure::database::entities::booking;
use crate::shared::db_err;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn entity_status_to_domain(status: booking::BookingStatus) -> BookingStatus {
    match status {
        booking::BookingStatus::Pending => BookingStatus::Pending,
        booking::BookingStatus::Confirmed => BookingStatus::Confirmed,
        booking::BookingStatus::Completed => BookingStatus::Completed,
        booking::BookingStatus::Cancelled => BookingStatus::Cancelled,
    }
}

fn domain_status_to_entity(status: BookingStatus) -> booking::BookingStatus {
    match status {
        BookingStatus::Pending => booking::BookingStatus::Pending,
        BookingStatus::Confirmed => booking::BookingStatus::Confirmed,
        BookingStatus::Completed => booking::BookingStatus::Completed,
        BookingStatus::Cancelled => booking::BookingStatus::Cancelled,
    }
}

fn booking_model_to_domain(model: booking::Model) -> Booking {
    Booking {
        id: model.id,
        user_id: model.user_id,
        dj_id: model.dj_id,
        event_date: model.event_date,
        event_duration: model.event_duration,
        event_location: model.event_location,
        event_type: model.event_type,
        event_notes: model.event_notes,
        contact_email: model.contact_email,
        contact_phone: model.contact_phone,
        status: entity_status_to_domain(model.status),
        quoted_price: model.quoted_price,
        final_price: model.final_price,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn create(&self, dto: NewBooking) -> DomainResult<Booking> {
        let now = Utc::now();

        let model = booking::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            user_id: Set(dto.user_id),
            dj_id: Set(dto.dj_id),
            event_date: Set(dto.event_date),
            event_duration: Set(dto.event_duration),
            event_location: Set(dto.event_location),
            event_type: Set(dto.event_type),
            event_notes: Set(dto.event_notes),
            contact_email: Set(dto.contact_email),
            contact_phone: Set(dto.contact_phone),
            status: Set(booking::BookingStatus::Pending),
            quoted_price: Set(dto.quoted_price),
            final_price: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        Ok(booking_model_to_domain(model))
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        status: Option<BookingStatus>,
    ) -> DomainResult<Vec<Booking>> {
        let mut query = booking::Entity::find().filter(booking::Column::UserId.eq(user_id));

        if let Some(status) = status {
            query = query.filter(booking::Column::Status.eq(domain_status_to_entity(status)));
        }

        let models = query
            .order_by_desc(booking::Column::CreatedAt)
            .order_by_desc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(booking_model_to_domain).collect())
    }
}
