//! Storage contract for customers.

use std::sync::Arc;

use async_trait::async_trait;
use storefront_core::{CustomerId, StoreResult};

use crate::customer::{Customer, NewCustomer};

#[async_trait]
pub trait CustomersRepository: Send + Sync {
    async fn find_by_id(&self, id: CustomerId) -> StoreResult<Option<Customer>>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Customer>>;

    /// Persist a new customer and assign its id.
    async fn create(&self, input: NewCustomer) -> StoreResult<Customer>;
}

#[async_trait]
impl<S> CustomersRepository for Arc<S>
where
    S: CustomersRepository + ?Sized,
{
    async fn find_by_id(&self, id: CustomerId) -> StoreResult<Option<Customer>> {
        (**self).find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Customer>> {
        (**self).find_by_email(email).await
    }

    async fn create(&self, input: NewCustomer) -> StoreResult<Customer> {
        (**self).create(input).await
    }
}
