//! Create volunteer profile table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VolunteerProfile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VolunteerProfile::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VolunteerProfile::UserId)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(VolunteerProfile::FullName).string_len(256).not_null())
                    .col(
                        ColumnDef::new(VolunteerProfile::Email)
                            .string_len(256)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(VolunteerProfile::Phone).string_len(32).not_null())
                    .col(ColumnDef::new(VolunteerProfile::Age).integer().not_null())
                    .col(ColumnDef::new(VolunteerProfile::Gender).string_len(8).not_null())
                    .col(ColumnDef::new(VolunteerProfile::Address).text().not_null())
                    .col(ColumnDef::new(VolunteerProfile::City).string_len(128).not_null())
                    .col(ColumnDef::new(VolunteerProfile::Pincode).string_len(16).not_null())
                    .col(ColumnDef::new(VolunteerProfile::Availability).string_len(128).not_null())
                    .col(
                        ColumnDef::new(VolunteerProfile::VolunteeringTypes)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(VolunteerProfile::HasVehicle).boolean().not_null())
                    .col(
                        ColumnDef::new(VolunteerProfile::FoodPreference)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(VolunteerProfile::IdProof).text().not_null())
                    .col(ColumnDef::new(VolunteerProfile::TermsAccepted).boolean().not_null())
                    .col(
                        ColumnDef::new(VolunteerProfile::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(VolunteerProfile::ReviewedBy).string_len(32))
                    .col(
                        ColumnDef::new(VolunteerProfile::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_volunteer_profile_user")
                            .from(VolunteerProfile::Table, VolunteerProfile::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VolunteerProfile::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum VolunteerProfile {
    Table,
    Id,
    UserId,
    FullName,
    Email,
    Phone,
    Age,
    Gender,
    Address,
    City,
    Pincode,
    Availability,
    VolunteeringTypes,
    HasVehicle,
    FoodPreference,
    IdProof,
    TermsAccepted,
    Status,
    ReviewedBy,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
