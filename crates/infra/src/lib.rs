//! Infrastructure layer: repository implementations and service wiring.

pub mod memory;
pub mod storefront;

pub use memory::{InMemoryCustomersRepository, InMemoryOrdersRepository, InMemoryProductsRepository};
pub use storefront::InMemoryStorefront;
