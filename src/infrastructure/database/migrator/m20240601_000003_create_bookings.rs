//! Create bookings table migration

use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_users::Users;
use super::m20240601_000002_create_dj_profiles::DjProfiles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::UserId).string().not_null())
                    .col(ColumnDef::new(Bookings::DjId).string().not_null())
                    .col(
                        ColumnDef::new(Bookings::EventDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bookings::EventDuration).integer().not_null())
                    .col(ColumnDef::new(Bookings::EventLocation).string().not_null())
                    .col(
                        ColumnDef::new(Bookings::EventType)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bookings::EventNotes).text().null())
                    .col(
                        ColumnDef::new(Bookings::ContactEmail)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bookings::ContactPhone).string_len(50).null())
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string_len(20)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(ColumnDef::new(Bookings::QuotedPrice).double().null())
                    .col(ColumnDef::new(Bookings::FinalPrice).double().null())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_user_id")
                            .from(Bookings::Table, Bookings::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_dj_id")
                            .from(Bookings::Table, Bookings::DjId)
                            .to(DjProfiles::Table, DjProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_user_id")
                    .table(Bookings::Table)
                    .col(Bookings::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_dj_id")
                    .table(Bookings::Table)
                    .col(Bookings::DjId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    UserId,
    DjId,
    EventDate,
    EventDuration,
    EventLocation,
    EventType,
    EventNotes,
    ContactEmail,
    ContactPhone,
    Status,
    QuotedPrice,
    FinalPrice,
    CreatedAt,
    UpdatedAt,
}
