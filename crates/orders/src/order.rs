use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{CustomerId, Entity, OrderId, ProductId};
use storefront_customers::Customer;
use storefront_products::Price;

/// One product within an order. `price` is the product price at the time the
/// order was placed, not a live reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub product_id: ProductId,
    pub price: Price,
    pub quantity: u32,
}

impl OrderLineItem {
    /// `price * quantity`, `None` on overflow.
    pub fn subtotal(&self) -> Option<Price> {
        self.price.checked_mul(self.quantity)
    }
}

/// A persisted order. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer: Customer,
    line_items: Vec<OrderLineItem>,
    created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(
        id: OrderId,
        customer: Customer,
        line_items: Vec<OrderLineItem>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer,
            line_items,
            created_at,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer.id_typed()
    }

    pub fn line_items(&self) -> &[OrderLineItem] {
        &self.line_items
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Sum of all line subtotals, `None` on overflow.
    pub fn total(&self) -> Option<Price> {
        self.line_items
            .iter()
            .try_fold(Price::ZERO, |acc, line| acc.checked_add(line.subtotal()?))
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// What the order writer receives: the owning customer and the validated lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer: Customer,
    pub line_items: Vec<OrderLineItem>,
}

/// One requested product in an order request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedProduct {
    #[serde(alias = "id")]
    pub product_id: ProductId,
    pub quantity: u32,
}

impl RequestedProduct {
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// Input of `CreateOrderService::execute`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: CustomerId,
    pub products: Vec<RequestedProduct>,
}

impl CreateOrderRequest {
    pub fn new(customer_id: CustomerId, products: Vec<RequestedProduct>) -> Self {
        Self {
            customer_id,
            products,
        }
    }
}
