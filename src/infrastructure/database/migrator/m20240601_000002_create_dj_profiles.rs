//! Create dj_profiles table migration

use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DjProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DjProfiles::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    // One profile per user
                    .col(
                        ColumnDef::new(DjProfiles::UserId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(DjProfiles::Bio).text().null())
                    .col(
                        ColumnDef::new(DjProfiles::Genres)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(DjProfiles::HourlyRate).double().null())
                    .col(ColumnDef::new(DjProfiles::Experience).integer().null())
                    .col(ColumnDef::new(DjProfiles::Phone).string_len(50).null())
                    .col(ColumnDef::new(DjProfiles::Instagram).string().null())
                    .col(ColumnDef::new(DjProfiles::Facebook).string().null())
                    .col(ColumnDef::new(DjProfiles::Youtube).string().null())
                    .col(ColumnDef::new(DjProfiles::Tiktok).string().null())
                    .col(ColumnDef::new(DjProfiles::Twitter).string().null())
                    .col(ColumnDef::new(DjProfiles::Website).string().null())
                    .col(ColumnDef::new(DjProfiles::City).string_len(255).null())
                    .col(ColumnDef::new(DjProfiles::State).string_len(255).null())
                    .col(ColumnDef::new(DjProfiles::ZipCode).string_len(20).null())
                    .col(ColumnDef::new(DjProfiles::Latitude).double().null())
                    .col(ColumnDef::new(DjProfiles::Longitude).double().null())
                    .col(ColumnDef::new(DjProfiles::Radius).integer().null())
                    .col(ColumnDef::new(DjProfiles::ProfileImage).string().null())
                    .col(
                        ColumnDef::new(DjProfiles::Credentials)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(DjProfiles::Status)
                            .string_len(20)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(ColumnDef::new(DjProfiles::VerificationNotes).text().null())
                    .col(
                        ColumnDef::new(DjProfiles::VerifiedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(DjProfiles::Rating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(DjProfiles::TotalReviews)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(DjProfiles::TotalBookings)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(DjProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DjProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dj_profiles_user_id")
                            .from(DjProfiles::Table, DjProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing filters by status and sorts by rating
        manager
            .create_index(
                Index::create()
                    .name("idx_dj_profiles_status_rating")
                    .table(DjProfiles::Table)
                    .col(DjProfiles::Status)
                    .col(DjProfiles::Rating)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DjProfiles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum DjProfiles {
    Table,
    Id,
    UserId,
    Bio,
    Genres,
    HourlyRate,
    Experience,
    Phone,
    Instagram,
    Facebook,
    Youtube,
    Tiktok,
    Twitter,
    Website,
    City,
    State,
    ZipCode,
    Latitude,
    Longitude,
    Radius,
    ProfileImage,
    Credentials,
    Status,
    VerificationNotes,
    VerifiedAt,
    Rating,
    TotalReviews,
    TotalBookings,
    CreatedAt,
    UpdatedAt,
}
