//! Booking entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum BookingStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Requesting user
    pub user_id: String,
    pub dj_id: String,

    pub event_date: DateTimeUtc,
    /// Hours
    pub event_duration: i32,
    pub event_location: String,
    pub event_type: String,
    #[sea_orm(nullable)]
    pub event_notes: Option<String>,

    pub contact_email: String,
    #[sea_orm(nullable)]
    pub contact_phone: Option<String>,

    pub status: BookingStatus,
    #[sea_orm(nullable)]
    pub quoted_price: Option<f64>,
    #[sea_orm(nullable)]
    pub final_price: Option<f64>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::dj_profile::Entity",
        from = "Column::DjId",
        to = "super::dj_profile::Column::Id",
        on_delete = "Cascade"
    )]
    DjProfile,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::dj_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DjProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
