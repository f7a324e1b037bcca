//! Orders module.
//!
//! The order record, its storage contract, and the two order use-cases:
//! placing an order against customer and product storage, and reading one back.

pub mod create;
pub mod find;
pub mod order;
pub mod repository;

pub use create::CreateOrderService;
pub use find::FindOrderService;
pub use order::{CreateOrderRequest, NewOrder, Order, OrderLineItem, RequestedProduct};
pub use repository::OrdersRepository;
