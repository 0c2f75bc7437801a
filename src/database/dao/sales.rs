use crate::database::entities::{sales, Sale};
use crate::database::{DatabaseError, DatabaseResult};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, QueryOrder, Set};

/// Sales DAO for database operations
pub struct SalesDao {
    db: DatabaseConnection,
}

impl SalesDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Store a sale, returning the stored row with its generated id
    pub async fn store(&self, sale: &Sale) -> DatabaseResult<Sale> {
        let active_model = sales::ActiveModel {
            id: ActiveValue::NotSet,
            date: Set(sale.date),
            total_sales: Set(sale.total_sales),
            holiday_season: Set(sale.holiday_season),
            promo_active: Set(sale.promo_active),
            economic_indicator: Set(sale.economic_indicator),
        };

        active_model
            .insert(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// List sales ordered by date descending
    pub async fn list_by_date_desc(&self) -> DatabaseResult<Vec<Sale>> {
        sales::Entity::find()
            .order_by_desc(sales::Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// Fetch the most recent sale by date, if any
    pub async fn latest(&self) -> DatabaseResult<Option<Sale>> {
        sales::Entity::find()
            .order_by_desc(sales::Column::Date)
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }
}
