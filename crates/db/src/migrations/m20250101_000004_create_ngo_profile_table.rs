//! Create NGO profile table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NgoProfile::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(NgoProfile::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(NgoProfile::UserId).string_len(32).not_null().unique_key())
                    .col(ColumnDef::new(NgoProfile::Name).string_len(256).not_null())
                    .col(ColumnDef::new(NgoProfile::RegistrationNumber).string_len(128).not_null())
                    .col(ColumnDef::new(NgoProfile::ContactPersonName).string_len(256).not_null())
                    .col(ColumnDef::new(NgoProfile::Email).string_len(256).not_null().unique_key())
                    .col(ColumnDef::new(NgoProfile::Phone).string_len(32).not_null())
                    .col(ColumnDef::new(NgoProfile::Address).text().not_null())
                    .col(ColumnDef::new(NgoProfile::Latitude).double().not_null())
                    .col(ColumnDef::new(NgoProfile::Longitude).double().not_null())
                    .col(ColumnDef::new(NgoProfile::AreasServed).json_binary().not_null())
                    .col(
                        ColumnDef::new(NgoProfile::BeneficiariesCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(NgoProfile::Quantity).integer().not_null())
                    .col(ColumnDef::new(NgoProfile::FoodType).json_binary().not_null())
                    .col(ColumnDef::new(NgoProfile::RegistrationCertificate).text().not_null())
                    .col(ColumnDef::new(NgoProfile::FssaiCompliance).text().not_null())
                    .col(ColumnDef::new(NgoProfile::PickupTiming).json_binary().not_null())
                    .col(ColumnDef::new(NgoProfile::TermsAccepted).boolean().not_null())
                    .col(
                        ColumnDef::new(NgoProfile::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(NgoProfile::ReviewedBy).string_len(32))
                    .col(
                        ColumnDef::new(NgoProfile::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ngo_profile_user")
                            .from(NgoProfile::Table, NgoProfile::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NgoProfile::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum NgoProfile {
    Table,
    Id,
    UserId,
    Name,
    RegistrationNumber,
    ContactPersonName,
    Email,
    Phone,
    Address,
    Latitude,
    Longitude,
    AreasServed,
    BeneficiariesCount,
    Quantity,
    FoodType,
    RegistrationCertificate,
    FssaiCompliance,
    PickupTiming,
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
