use storefront_core::{DomainError, OrderId, ServiceResult};

use crate::order::Order;
use crate::repository::OrdersRepository;

/// Reads a single order back by id.
pub struct FindOrderService<O> {
    orders: O,
}

impl<O: OrdersRepository> FindOrderService<O> {
    pub fn new(orders: O) -> Self {
        Self { orders }
    }

    #[tracing::instrument(skip(self), err)]
    pub async fn execute(&self, id: OrderId) -> ServiceResult<Order> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("order").into())
    }
}
