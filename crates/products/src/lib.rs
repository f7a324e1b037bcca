//! Products module.
//!
//! Catalog records with price and available stock, the storage contract used
//! for lookups and stock movements, and the product creation use-case.

pub mod price;
pub mod product;
pub mod repository;
pub mod service;
pub mod stock;

pub use price::Price;
pub use product::{NewProduct, Product};
pub use repository::ProductsRepository;
pub use service::CreateProductService;
pub use stock::StockUpdate;
