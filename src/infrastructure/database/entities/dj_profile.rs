//! DJ profile entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Verification status
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum DjStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "VERIFIED")]
    Verified,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
    #[sea_orm(string_value = "SUSPENDED")]
    Suspended,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dj_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub user_id: String,

    #[sea_orm(nullable)]
    pub bio: Option<String>,

    /// JSON array of genre names
    #[sea_orm(column_type = "Text")]
    pub genres: String,

    #[sea_orm(nullable)]
    pub hourly_rate: Option<f64>,
    #[sea_orm(nullable)]
    pub experience: Option<i32>,

    // Contact and social links
    #[sea_orm(nullable)]
    pub phone: Option<String>,
    #[sea_orm(nullable)]
    pub instagram: Option<String>,
    #[sea_orm(nullable)]
    pub facebook: Option<String>,
    #[sea_orm(nullable)]
    pub youtube: Option<String>,
    #[sea_orm(nullable)]
    pub tiktok: Option<String>,
    #[sea_orm(nullable)]
    pub twitter: Option<String>,
    #[sea_orm(nullable)]
    pub website: Option<String>,

    // Location
    #[sea_orm(nullable)]
    pub city: Option<String>,
    #[sea_orm(nullable)]
    pub state: Option<String>,
    #[sea_orm(nullable)]
    pub zip_code: Option<String>,
    #[sea_orm(nullable)]
    pub latitude: Option<f64>,
    #[sea_orm(nullable)]
    pub longitude: Option<f64>,
    #[sea_orm(nullable)]
    pub radius: Option<i32>,

    #[sea_orm(nullable)]
    pub profile_image: Option<String>,
    /// JSON array of document references
    #[sea_orm(column_type = "Text")]
    pub credentials: String,

    pub status: DjStatus,
    #[sea_orm(nullable)]
    pub verification_notes: Option<String>,
    #[sea_orm(nullable)]
    pub verified_at: Option<DateTimeUtc>,

    pub rating: f64,
    pub total_reviews: i32,
    pub total_bookings: i32,

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
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
