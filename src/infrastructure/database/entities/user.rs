//! User entity for database

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum UserRole {
    #[sea_orm(string_value = "USER")]
    User,
    #[sea_orm(string_value = "DJ")]
    Dj,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::User
    }
}

/// User model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(nullable)]
    pub name: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(nullable)]
    pub email_verified_at: Option<DateTimeUtc>,
    #[sea_orm(nullable)]
    pub password_hash: Option<String>,
    #[sea_orm(nullable)]
    pub image: Option<String>,
    pub role: UserRole,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::dj_profile::Entity")]
    DjProfile,
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
}

impl Related<super::dj_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DjProfile.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
