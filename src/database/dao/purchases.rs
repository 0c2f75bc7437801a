use crate::database::entities::{purchases, Purchase};
use crate::database::{DatabaseError, DatabaseResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

/// Purchases DAO for database operations
pub struct PurchasesDao {
    db: DatabaseConnection,
}

impl PurchasesDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Store a purchase record with its pre-generated id
    pub async fn store(&self, record: &Purchase) -> DatabaseResult<Purchase> {
        let active_model = purchases::ActiveModel {
            id: Set(record.id.clone()),
            product_id: Set(record.product_id.clone()),
            category: Set(record.category.clone()),
            customer_id: Set(record.customer_id.clone()),
            date: Set(record.date),
            item_name: Set(record.item_name.clone()),
            quantity: Set(record.quantity),
            unit_price: Set(record.unit_price),
            total: Set(record.total),
            timestamp: Set(record.timestamp.clone()),
        };

        active_model
            .insert(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// List every purchase record, unordered (input to the insights engine)
    pub async fn list_all(&self) -> DatabaseResult<Vec<Purchase>> {
        purchases::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// List purchases ordered by business date descending
    pub async fn list_by_date_desc(&self) -> DatabaseResult<Vec<Purchase>> {
        purchases::Entity::find()
            .order_by_desc(purchases::Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }
}
