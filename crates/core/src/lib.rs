//! `storefront-core` — shared domain building blocks.
//!
//! Typed identifiers, the entity/value-object markers and the error model used
//! by every use-case crate. No IO lives here.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, ServiceError, ServiceResult, StoreError, StoreResult};
pub use id::{CustomerId, OrderId, ProductId};
pub use value_object::ValueObject;
