pub mod products;
pub mod purchases;
pub mod sales;

pub use products::ProductsDao;
pub use purchases::PurchasesDao;
pub use sales::SalesDao;
