//! Create `todo` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Todo::Table)
                    .if_not_exists()
                    .col(pk_auto(Todo::Id))
                    .col(string(Todo::Title))
                    .col(text_null(Todo::Description))
                    .col(date(Todo::Day))
                    .col(boolean(Todo::Completed).default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Todo::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Todo { Table, Id, Title, Description, Day, Completed }
