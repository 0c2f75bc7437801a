pub mod health;
pub mod products;
pub mod sales;

pub use health::create_health_routes;
pub use products::create_product_routes;
pub use sales::create_sales_routes;
