//! Migration: Create the listings table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Listings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Listings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Listings::UserId).integer().not_null())
                    .col(ColumnDef::new(Listings::ListingType).string().not_null())
                    .col(ColumnDef::new(Listings::Price).integer().not_null())
                    // Microseconds since the epoch
                    .col(ColumnDef::new(Listings::CreatedAt).integer().not_null())
                    .col(ColumnDef::new(Listings::UpdatedAt).integer().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Listings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Listings {
    Table,
    Id,
    UserId,
    ListingType,
    Price,
    CreatedAt,
    UpdatedAt,
}
