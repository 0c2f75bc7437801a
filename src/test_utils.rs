use crate::{
    config::Config,
    database::entities::{Product, Purchase, Sale},
    database::DatabaseManager,
    server::Server,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

/// Test server builder for creating test instances backed by an
/// in-memory SQLite database with migrations applied.
pub struct TestServerBuilder {
    config: Config,
}

impl TestServerBuilder {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.database.url = "sqlite::memory:".to_string();
        config.logging.log_request = false;
        Self { config }
    }

    /// Set a custom configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Build the test server with configured settings
    pub async fn build(self) -> Server {
        let server = Server::new(self.config).await.unwrap();
        server.database.migrate().await.unwrap();
        server
    }
}

impl Default for TestServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a test product in the database
pub async fn create_test_product(
    database: &Arc<dyn DatabaseManager>,
    name: &str,
    category: &str,
    price: Decimal,
) -> Product {
    let product = Product {
        id: 0,
        name: name.to_string(),
        category: category.to_string(),
        price,
    };
    database.products().store(&product).await.unwrap()
}

/// Create a test purchase in the database
pub async fn create_test_purchase(
    database: &Arc<dyn DatabaseManager>,
    category: &str,
    item_name: &str,
    quantity: i32,
    unit_price: Decimal,
    date: NaiveDate,
) -> Purchase {
    let purchase = Purchase {
        id: Uuid::new_v4().simple().to_string(),
        product_id: "test-product".to_string(),
        category: category.to_string(),
        customer_id: Some("test-customer".to_string()),
        date,
        item_name: item_name.to_string(),
        quantity,
        unit_price,
        total: unit_price * Decimal::from(quantity),
        timestamp: "January 05, 2024 at 03:04:05 PM UTC+8".to_string(),
    };
    database.purchases().store(&purchase).await.unwrap()
}

/// Create a test sale in the database
pub async fn create_test_sale(
    database: &Arc<dyn DatabaseManager>,
    date: NaiveDate,
    total_sales: Decimal,
) -> Sale {
    let sale = Sale {
        id: 0,
        date,
        total_sales,
        holiday_season: false,
        promo_active: false,
        economic_indicator: 1.0,
    };
    database.sales().store(&sale).await.unwrap()
}
