pub mod products;
pub mod purchases;
pub mod sales;

pub use products::Entity as Products;
pub use purchases::Entity as Purchases;
pub use sales::Entity as Sales;

// Type aliases
pub type Product = products::Model;
pub type Purchase = purchases::Model;
pub type Sale = sales::Model;
