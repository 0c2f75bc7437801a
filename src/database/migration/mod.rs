use sea_orm_migration::prelude::*;

pub use sea_orm_migration::MigratorTrait;

mod m20250301_000100_create_products_table;
mod m20250301_000200_create_purchases_table;
mod m20250301_000300_create_sales_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000100_create_products_table::Migration),
            Box::new(m20250301_000200_create_purchases_table::Migration),
            Box::new(m20250301_000300_create_sales_table::Migration),
        ]
    }
}

/// Common table and column identifiers
#[derive(Iden)]
pub enum Products {
    Table,
    Id,
    Name,
    Category,
    Price,
}

#[derive(Iden)]
pub enum Purchases {
    Table,
    Id,
    ProductId,
    Category,
    CustomerId,
    Date,
    ItemName,
    Quantity,
    UnitPrice,
    Total,
    Timestamp,
}

#[derive(Iden)]
pub enum Sales {
    Table,
    Id,
    Date,
    TotalSales,
    HolidaySeason,
    PromoActive,
    EconomicIndicator,
}
