//! Create donation request table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DonationRequest::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DonationRequest::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DonationRequest::Title).string_len(256).not_null())
                    .col(ColumnDef::new(DonationRequest::Description).text().not_null())
                    .col(ColumnDef::new(DonationRequest::Quantity).integer().not_null())
                    .col(ColumnDef::new(DonationRequest::RequiredBy).date().not_null())
                    .col(
                        ColumnDef::new(DonationRequest::DietaryRequirements)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DonationRequest::NgoId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(DonationRequest::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(DonationRequest::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_donation_request_ngo")
                            .from(DonationRequest::Table, DonationRequest::NgoId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_donation_request_ngo_id")
                    .table(DonationRequest::Table)
                    .col(DonationRequest::NgoId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DonationRequest::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DonationRequest {
    Table,
    Id,
    Title,
    Description,
    Quantity,
    RequiredBy,
    DietaryRequirements,
    NgoId,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
