//! In-memory repositories for tests/dev.
//!
//! Each store keeps its rows behind a single `RwLock`; every write validates
//! and applies its whole input under one write guard.

pub mod customers;
pub mod orders;
pub mod products;

pub use customers::InMemoryCustomersRepository;
pub use orders::InMemoryOrdersRepository;
pub use products::InMemoryProductsRepository;

use storefront_core::StoreError;

fn poisoned<T>(_: T) -> StoreError {
    StoreError::LockPoisoned
}
