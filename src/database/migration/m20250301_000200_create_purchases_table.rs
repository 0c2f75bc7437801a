use super::Purchases;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Purchases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Purchases::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Purchases::ProductId).string().not_null())
                    .col(ColumnDef::new(Purchases::Category).string().not_null())
                    .col(ColumnDef::new(Purchases::CustomerId).string().null())
                    .col(ColumnDef::new(Purchases::Date).date().not_null())
                    .col(ColumnDef::new(Purchases::ItemName).string().not_null())
                    .col(ColumnDef::new(Purchases::Quantity).integer().not_null())
                    .col(
                        ColumnDef::new(Purchases::UnitPrice)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Purchases::Total)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Purchases::Timestamp).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Create index on date for history ordering
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_purchases_date")
                    .table(Purchases::Table)
                    .col(Purchases::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Purchases::Table).to_owned())
            .await
    }
}
