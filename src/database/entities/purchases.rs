use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A purchase record. `product_id` is a caller-supplied reference, not a
/// foreign key; purchases may name items with no matching product row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub product_id: String,
    pub category: String,
    pub customer_id: Option<String>,
    pub date: Date,
    pub item_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total: Decimal,
    /// Creation time rendered as a fixed UTC+8 string, e.g.
    /// "January 05, 2024 at 03:04:05 PM UTC+8".
    pub timestamp: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
