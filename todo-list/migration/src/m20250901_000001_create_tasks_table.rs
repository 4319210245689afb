use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const TITLE_MAX_LEN: u32 = 50;
const DESCRIPTION_MAX_LEN: u32 = 250;
const ENUM_MAX_LEN: u32 = 16;
const DEFAULT_PRIORITY: &str = "Low";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(pk_auto(Tasks::Id))
                    .col(string_len(Tasks::Title, TITLE_MAX_LEN))
                    .col(string_len(Tasks::Description, DESCRIPTION_MAX_LEN))
                    .col(date(Tasks::DueDate))
                    .col(string_len(Tasks::Status, ENUM_MAX_LEN))
                    .col(string_len(Tasks::Priority, ENUM_MAX_LEN).default(DEFAULT_PRIORITY))
                    .col(date(Tasks::CreationDate))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    Title,
    Description,
    DueDate,
    Status,
    Priority,
    CreationDate,
}
