//! Creates the `expenses` table.
//!
//! Amounts are stored as integer cents (`sum_minor`), timestamps as UTC
//! instants.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    Description,
    SumMinor,
    Currency,
    Moment,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::Description).string().not_null())
                    .col(ColumnDef::new(Expenses::SumMinor).big_integer().not_null())
                    .col(ColumnDef::new(Expenses::Currency).string().not_null())
                    .col(ColumnDef::new(Expenses::Moment).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-moment")
                    .table(Expenses::Table)
                    .col(Expenses::Moment)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-currency-moment")
                    .table(Expenses::Table)
                    .col(Expenses::Currency)
                    .col(Expenses::Moment)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await
    }
}
