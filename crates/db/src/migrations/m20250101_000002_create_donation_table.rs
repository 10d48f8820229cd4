//! Create donation table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Donation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Donation::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Donation::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Donation::Description).text())
                    .col(ColumnDef::new(Donation::Quantity).integer().not_null())
                    .col(ColumnDef::new(Donation::ExpiryDate).string_len(64))
                    .col(ColumnDef::new(Donation::PickupAddress).text())
                    .col(ColumnDef::new(Donation::PickupTime).string_len(64))
                    .col(ColumnDef::new(Donation::Photo).text())
                    .col(ColumnDef::new(Donation::DonorName).string_len(256))
                    .col(ColumnDef::new(Donation::DonorPhone).string_len(32))
                    .col(ColumnDef::new(Donation::Latitude).double())
                    .col(ColumnDef::new(Donation::Longitude).double())
                    .col(ColumnDef::new(Donation::FoodType).string_len(64))
                    .col(ColumnDef::new(Donation::DonorId).string_len(32).not_null())
                    .col(ColumnDef::new(Donation::NgoId).string_len(32))
                    .col(
                        ColumnDef::new(Donation::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Donation::ClaimedBy).string_len(32))
                    .col(ColumnDef::new(Donation::ClaimedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Donation::CompletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Donation::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_donation_donor")
                            .from(Donation::Table, Donation::DonorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_donation_ngo")
                            .from(Donation::Table, Donation::NgoId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_donation_claimed_by")
                            .from(Donation::Table, Donation::ClaimedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: donor_id (donor listing)
        manager
            .create_index(
                Index::create()
                    .name("idx_donation_donor_id")
                    .table(Donation::Table)
                    .col(Donation::DonorId)
                    .to_owned(),
            )
            .await?;

        // Index: (status, created_at) for NGO and volunteer queues
        manager
            .create_index(
                Index::create()
                    .name("idx_donation_status_created_at")
                    .table(Donation::Table)
                    .col(Donation::Status)
                    .col(Donation::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Index: claimed_by (active deliveries, leaderboard)
        manager
            .create_index(
                Index::create()
                    .name("idx_donation_claimed_by")
                    .table(Donation::Table)
                    .col(Donation::ClaimedBy)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_donation_ngo_id")
                    .table(Donation::Table)
                    .col(Donation::NgoId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Donation::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Donation {
    Table,
    Id,
    Title,
    Description,
    Quantity,
    ExpiryDate,
    PickupAddress,
    PickupTime,
    Photo,
    DonorName,
    DonorPhone,
    Latitude,
    Longitude,
    FoodType,
    DonorId,
    NgoId,
    Status,
    ClaimedBy,
    ClaimedAt,
    CompletedAt,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
