use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use storefront_core::{CustomerId, OrderId, StoreResult};
use storefront_orders::{NewOrder, Order, OrdersRepository};

use super::poisoned;

/// In-memory order store. Assigns ids (UUIDv7) and creation timestamps.
#[derive(Debug, Default)]
pub struct InMemoryOrdersRepository {
    rows: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrdersRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.rows.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Orders placed by one customer, oldest first.
    pub fn for_customer(&self, customer_id: CustomerId) -> StoreResult<Vec<Order>> {
        let rows = self.rows.read().map_err(poisoned)?;
        let mut orders: Vec<Order> = rows
            .values()
            .filter(|o| o.customer_id() == customer_id)
            .cloned()
            .collect();
        orders.sort_by_key(|o| (o.created_at(), o.id_typed()));
        Ok(orders)
    }
}

#[async_trait]
impl OrdersRepository for InMemoryOrdersRepository {
    async fn create(&self, input: NewOrder) -> StoreResult<Order> {
        let order = Order::new(OrderId::new(), input.customer, input.line_items, Utc::now());
        let mut rows = self.rows.write().map_err(poisoned)?;
        rows.insert(order.id_typed(), order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: OrderId) -> StoreResult<Option<Order>> {
        let rows = self.rows.read().map_err(poisoned)?;
        Ok(rows.get(&id).cloned())
    }
}
