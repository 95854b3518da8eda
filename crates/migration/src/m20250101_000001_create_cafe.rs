//! Create `cafe` table.
//!
//! `name` carries a unique index; the service also checks it before inserting.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cafe::Table)
                    .if_not_exists()
                    .col(pk_auto(Cafe::Id))
                    .col(string(Cafe::Name).unique_key())
                    .col(string(Cafe::MapUrl))
                    .col(string(Cafe::ImgUrl))
                    .col(string(Cafe::Location))
                    .col(string(Cafe::Seats))
                    .col(boolean(Cafe::HasToilet))
                    .col(boolean(Cafe::HasWifi))
                    .col(boolean(Cafe::HasSockets))
                    .col(boolean(Cafe::CanTakeCalls))
                    .col(string_null(Cafe::CoffeePrice))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cafe_location")
                    .table(Cafe::Table)
                    .col(Cafe::Location)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Cafe::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Cafe {
    Table,
    Id,
    Name,
    MapUrl,
    ImgUrl,
    Location,
    Seats,
    HasToilet,
    HasWifi,
    HasSockets,
    CanTakeCalls,
    CoffeePrice,
}
