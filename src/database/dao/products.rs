use crate::database::entities::{products, Product};
use crate::database::{DatabaseError, DatabaseResult};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, Set};

/// Products DAO for database operations
pub struct ProductsDao {
    db: DatabaseConnection,
}

impl ProductsDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Store a product, returning the stored row with its generated id
    pub async fn store(&self, product: &Product) -> DatabaseResult<Product> {
        let active_model = products::ActiveModel {
            id: ActiveValue::NotSet,
            name: Set(product.name.clone()),
            category: Set(product.category.clone()),
            price: Set(product.price),
        };

        active_model
            .insert(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// List all products, unfiltered
    pub async fn list(&self) -> DatabaseResult<Vec<Product>> {
        products::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }
}
