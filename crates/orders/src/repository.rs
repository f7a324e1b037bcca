//! Storage contract for orders.

use std::sync::Arc;

use async_trait::async_trait;
use storefront_core::{OrderId, StoreResult};

use crate::order::{NewOrder, Order};

#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Persist a new order, assigning its id and creation time.
    async fn create(&self, input: NewOrder) -> StoreResult<Order>;

    async fn find_by_id(&self, id: OrderId) -> StoreResult<Option<Order>>;
}

#[async_trait]
impl<S> OrdersRepository for Arc<S>
where
    S: OrdersRepository + ?Sized,
{
    async fn create(&self, input: NewOrder) -> StoreResult<Order> {
        (**self).create(input).await
    }

    async fn find_by_id(&self, id: OrderId) -> StoreResult<Option<Order>> {
        (**self).find_by_id(id).await
    }
}
