//! Order placement.
//!
//! ```text
//! CreateOrderRequest
//!   ↓
//! 0. Reject zero quantities
//!   ↓
//! 1. Look up the customer                      → NotFound("customer")
//!   ↓
//! 2. Look up all requested products (1 batch)  → Validation("unknown product")
//!   ↓
//! 3. Check stock for every requested entry     → Validation("insufficient stock")
//!   ↓
//! 4. Build line items from the found products
//!   ↓
//! 5. Decrement stock (1 batch)
//!   ↓
//! 6. Persist the order                         → on failure: restock, then surface the error
//! ```
//!
//! Every check in steps 0–3 runs before any write, so a rejected request leaves
//! storage untouched. Collaborator errors reach the caller unchanged.
//!
//! Duplicate product ids in a request are counted as-is in step 2, while the
//! lookup returns each product once; such a request therefore fails as
//! "unknown product" against a deduplicating store.

use tracing::{debug, error, info, warn};

use storefront_core::{DomainError, ProductId, ServiceResult};
use storefront_customers::CustomersRepository;
use storefront_products::{Product, ProductsRepository, StockUpdate};

use crate::order::{CreateOrderRequest, NewOrder, Order, OrderLineItem, RequestedProduct};
use crate::repository::OrdersRepository;

/// Places orders: validates the request, reserves stock and writes the order.
pub struct CreateOrderService<O, P, C> {
    orders: O,
    products: P,
    customers: C,
}

impl<O, P, C> CreateOrderService<O, P, C>
where
    O: OrdersRepository,
    P: ProductsRepository,
    C: CustomersRepository,
{
    pub fn new(orders: O, products: P, customers: C) -> Self {
        Self {
            orders,
            products,
            customers,
        }
    }

    #[tracing::instrument(
        skip(self, request),
        fields(
            customer_id = %request.customer_id,
            requested = request.products.len()
        ),
        err
    )]
    pub async fn execute(&self, request: CreateOrderRequest) -> ServiceResult<Order> {
        let CreateOrderRequest {
            customer_id,
            products: requested,
        } = request;

        if requested.iter().any(|r| r.quantity == 0) {
            return Err(reject("quantity must be positive").into());
        }

        let customer = self
            .customers
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| {
                debug!("order rejected: customer not found");
                DomainError::not_found("customer")
            })?;

        let ids: Vec<ProductId> = requested.iter().map(|r| r.product_id).collect();
        let found = self.products.find_all_by_id(&ids).await?;

        if found.len() < requested.len() {
            return Err(reject("unknown product").into());
        }

        if has_insufficient_stock(&requested, &found) {
            return Err(reject("insufficient stock").into());
        }

        let line_items = build_line_items(&requested, &found)?;

        let updates: Vec<StockUpdate> = requested
            .iter()
            .map(|r| StockUpdate::new(r.product_id, r.quantity))
            .collect();

        self.products.update_quantity(&updates).await?;

        let order = match self
            .orders
            .create(NewOrder {
                customer,
                line_items,
            })
            .await
        {
            Ok(order) => order,
            Err(err) => {
                self.compensate(&updates).await;
                return Err(err.into());
            }
        };

        info!(
            order_id = %order.id_typed(),
            line_items = order.line_items().len(),
            "order created"
        );
        Ok(order)
    }

    /// Give back the stock taken for an order that could not be written.
    async fn compensate(&self, updates: &[StockUpdate]) {
        warn!(updates = updates.len(), "order write failed; restocking");
        if let Err(e) = self.products.restock(updates).await {
            error!(error = %e, "restock after failed order write did not complete");
        }
    }
}

fn reject(reason: &'static str) -> DomainError {
    debug!(reason, "order rejected");
    DomainError::validation(reason)
}

/// True if any requested entry asks for more than its product has.
fn has_insufficient_stock(requested: &[RequestedProduct], found: &[Product]) -> bool {
    requested.iter().any(|r| {
        found
            .iter()
            .any(|p| p.id_typed() == r.product_id && !p.has_stock_for(r.quantity))
    })
}

/// One line per found product, in lookup order, priced from the product and
/// sized by the first requested entry with the same id. A product the finder
/// returned twice is treated like an unrequested one.
fn build_line_items(
    requested: &[RequestedProduct],
    found: &[Product],
) -> Result<Vec<OrderLineItem>, DomainError> {
    found
        .iter()
        .enumerate()
        .map(|(i, product)| -> Result<OrderLineItem, DomainError> {
            if found[..i].iter().any(|p| p.id_typed() == product.id_typed()) {
                return Err(reject("unknown product"));
            }
            let first = requested
                .iter()
                .find(|r| r.product_id == product.id_typed())
                .ok_or_else(|| reject("unknown product"))?;
            Ok(OrderLineItem {
                product_id: product.id_typed(),
                price: product.price(),
                quantity: first.quantity,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;
    use storefront_core::{CustomerId, OrderId, ServiceError, StoreError, StoreResult};
    use storefront_customers::{Customer, NewCustomer};
    use storefront_products::{NewProduct, Price};

    use super::*;

    #[derive(Default)]
    struct FakeCustomers {
        rows: Vec<Customer>,
        fail_lookup: bool,
    }

    #[async_trait]
    impl CustomersRepository for FakeCustomers {
        async fn find_by_id(&self, id: CustomerId) -> StoreResult<Option<Customer>> {
            if self.fail_lookup {
                return Err(StoreError::unavailable("customers table offline"));
            }
            Ok(self.rows.iter().find(|c| c.id_typed() == id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> StoreResult<Option<Customer>> {
            Ok(self.rows.iter().find(|c| c.email() == email).cloned())
        }

        async fn create(&self, _input: NewCustomer) -> StoreResult<Customer> {
            Err(StoreError::unavailable("read-only fake"))
        }
    }

    /// Returns stored products in storage order and records every stock call.
    #[derive(Default)]
    struct FakeProducts {
        rows: Mutex<Vec<Product>>,
        updates: Mutex<Vec<Vec<StockUpdate>>>,
        restocks: Mutex<Vec<Vec<StockUpdate>>>,
        fail_lookup: bool,
        fail_update: bool,
        fail_restock: bool,
    }

    impl FakeProducts {
        fn stock_of(&self, id: ProductId) -> u32 {
            let rows = self.rows.lock().unwrap();
            rows.iter().find(|p| p.id_typed() == id).unwrap().quantity()
        }
    }

    #[async_trait]
    impl ProductsRepository for FakeProducts {
        async fn find_all_by_id(&self, ids: &[ProductId]) -> StoreResult<Vec<Product>> {
            if self.fail_lookup {
                return Err(StoreError::unavailable("catalog offline"));
            }
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().filter(|p| ids.contains(&p.id_typed())).cloned().collect())
        }

        async fn update_quantity(&self, updates: &[StockUpdate]) -> StoreResult<()> {
            if self.fail_update {
                return Err(StoreError::unavailable("stock table locked"));
            }
            self.updates.lock().unwrap().push(updates.to_vec());
            let mut rows = self.rows.lock().unwrap();
            for u in updates {
                if let Some(p) = rows.iter_mut().find(|p| p.id_typed() == u.id) {
                    p.take_stock(u.quantity)
                        .map_err(|e| StoreError::conflict(e.to_string()))?;
                }
            }
            Ok(())
        }

        async fn restock(&self, updates: &[StockUpdate]) -> StoreResult<()> {
            self.restocks.lock().unwrap().push(updates.to_vec());
            if self.fail_restock {
                return Err(StoreError::unavailable("stock table locked"));
            }
            let mut rows = self.rows.lock().unwrap();
            for u in updates {
                if let Some(p) = rows.iter_mut().find(|p| p.id_typed() == u.id) {
                    p.return_stock(u.quantity)
                        .map_err(|e| StoreError::conflict(e.to_string()))?;
                }
            }
            Ok(())
        }

        async fn find_by_name(&self, _name: &str) -> StoreResult<Option<Product>> {
            Ok(None)
        }

        async fn create(&self, _input: NewProduct) -> StoreResult<Product> {
            Err(StoreError::unavailable("read-only fake"))
        }
    }

    #[derive(Default)]
    struct FakeOrders {
        rows: Mutex<Vec<Order>>,
        fail_create: bool,
    }

    #[async_trait]
    impl OrdersRepository for FakeOrders {
        async fn create(&self, input: NewOrder) -> StoreResult<Order> {
            if self.fail_create {
                return Err(StoreError::unavailable("orders table offline"));
            }
            let order = Order::new(OrderId::new(), input.customer, input.line_items, Utc::now());
            self.rows.lock().unwrap().push(order.clone());
            Ok(order)
        }

        async fn find_by_id(&self, id: OrderId) -> StoreResult<Option<Order>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|o| o.id_typed() == id).cloned())
        }
    }

    struct Fixture {
        customer: Customer,
        p1: Product,
        p2: Product,
        orders: Arc<FakeOrders>,
        products: Arc<FakeProducts>,
        service: CreateOrderService<Arc<FakeOrders>, Arc<FakeProducts>, FakeCustomers>,
    }

    fn fixture_with(orders: FakeOrders, products: FakeProducts) -> Fixture {
        fixture_full(orders, products, FakeCustomers::default())
    }

    fn fixture_full(
        orders: FakeOrders,
        mut products: FakeProducts,
        mut customers: FakeCustomers,
    ) -> Fixture {
        let customer = Customer::new(CustomerId::new(), "Ada", "ada@example.com");
        let p1 = Product::new(ProductId::new(), "P1", Price::from_cents(1000), 5);
        let p2 = Product::new(ProductId::new(), "P2", Price::from_cents(2000), 3);
        products.rows = Mutex::new(vec![p1.clone(), p2.clone()]);

        let orders = Arc::new(orders);
        let products = Arc::new(products);
        customers.rows = vec![customer.clone()];
        let service = CreateOrderService::new(orders.clone(), products.clone(), customers);

        Fixture {
            customer,
            p1,
            p2,
            orders,
            products,
            service,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(FakeOrders::default(), FakeProducts::default())
    }

    impl Fixture {
        fn request(&self, lines: &[(ProductId, u32)]) -> CreateOrderRequest {
            CreateOrderRequest::new(
                self.customer.id_typed(),
                lines
                    .iter()
                    .map(|(id, q)| RequestedProduct::new(*id, *q))
                    .collect(),
            )
        }

        fn assert_untouched(&self) {
            assert!(self.products.updates.lock().unwrap().is_empty());
            assert!(self.products.restocks.lock().unwrap().is_empty());
            assert!(self.orders.rows.lock().unwrap().is_empty());
            assert_eq!(self.products.stock_of(self.p1.id_typed()), 5);
            assert_eq!(self.products.stock_of(self.p2.id_typed()), 3);
        }
    }

    fn validation(msg: &str) -> ServiceError {
        ServiceError::Domain(DomainError::validation(msg))
    }

    #[tokio::test]
    async fn places_order_and_decrements_stock() {
        let f = fixture();
        let (p1, p2) = (f.p1.id_typed(), f.p2.id_typed());

        let order = f.service.execute(f.request(&[(p1, 2), (p2, 1)])).await.unwrap();

        assert_eq!(order.customer(), &f.customer);
        assert_eq!(
            order.line_items(),
            &[
                OrderLineItem {
                    product_id: p1,
                    price: Price::from_cents(1000),
                    quantity: 2,
                },
                OrderLineItem {
                    product_id: p2,
                    price: Price::from_cents(2000),
                    quantity: 1,
                },
            ]
        );
        assert_eq!(order.total(), Some(Price::from_cents(4000)));

        assert_eq!(
            *f.products.updates.lock().unwrap(),
            vec![vec![StockUpdate::new(p1, 2), StockUpdate::new(p2, 1)]]
        );
        assert_eq!(f.products.stock_of(p1), 3);
        assert_eq!(f.products.stock_of(p2), 2);
        assert_eq!(f.orders.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_customer_is_not_found() {
        let f = fixture();
        let mut request = f.request(&[(f.p1.id_typed(), 1)]);
        request.customer_id = CustomerId::new();

        let err = f.service.execute(request).await.unwrap_err();

        assert_eq!(err, ServiceError::Domain(DomainError::not_found("customer")));
        f.assert_untouched();
    }

    #[tokio::test]
    async fn unknown_product_is_rejected() {
        let f = fixture();

        let err = f
            .service
            .execute(f.request(&[(f.p1.id_typed(), 1), (ProductId::new(), 1)]))
            .await
            .unwrap_err();

        assert_eq!(err, validation("unknown product"));
        f.assert_untouched();
    }

    #[tokio::test]
    async fn insufficient_stock_is_rejected() {
        let f = fixture();

        let err = f
            .service
            .execute(f.request(&[(f.p1.id_typed(), 1), (f.p2.id_typed(), 4)]))
            .await
            .unwrap_err();

        assert_eq!(err, validation("insufficient stock"));
        f.assert_untouched();
    }

    #[tokio::test]
    async fn exact_stock_is_enough() {
        let f = fixture();
        let p2 = f.p2.id_typed();

        f.service.execute(f.request(&[(p2, 3)])).await.unwrap();

        assert_eq!(f.products.stock_of(p2), 0);
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected_before_any_lookup() {
        let f = fixture();

        let err = f
            .service
            .execute(f.request(&[(f.p1.id_typed(), 0)]))
            .await
            .unwrap_err();

        assert_eq!(err, validation("quantity must be positive"));
        f.assert_untouched();
    }

    #[tokio::test]
    async fn duplicate_product_ids_count_as_unknown() {
        let f = fixture();
        let p1 = f.p1.id_typed();

        let err = f
            .service
            .execute(f.request(&[(p1, 2), (p1, 1)]))
            .await
            .unwrap_err();

        assert_eq!(err, validation("unknown product"));
        f.assert_untouched();
    }

    #[tokio::test]
    async fn line_items_follow_lookup_order() {
        let f = fixture();
        let (p1, p2) = (f.p1.id_typed(), f.p2.id_typed());
        f.products.rows.lock().unwrap().reverse();

        let order = f.service.execute(f.request(&[(p1, 1), (p2, 1)])).await.unwrap();

        let ids: Vec<ProductId> = order.line_items().iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![p2, p1]);
    }

    #[tokio::test]
    async fn repeated_requests_create_distinct_orders() {
        let f = fixture();
        let p2 = f.p2.id_typed();

        let first = f.service.execute(f.request(&[(p2, 2)])).await.unwrap();
        let err = f.service.execute(f.request(&[(p2, 2)])).await.unwrap_err();
        let second = f.service.execute(f.request(&[(p2, 1)])).await.unwrap();

        assert_eq!(err, validation("insufficient stock"));
        assert_ne!(first.id_typed(), second.id_typed());
        assert_eq!(f.products.stock_of(p2), 0);
        assert_eq!(f.orders.rows.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn stock_update_failure_propagates_without_writing_an_order() {
        let f = fixture_with(
            FakeOrders::default(),
            FakeProducts {
                fail_update: true,
                ..FakeProducts::default()
            },
        );

        let err = f
            .service
            .execute(f.request(&[(f.p1.id_typed(), 1)]))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::Store(StoreError::unavailable("stock table locked"))
        );
        f.assert_untouched();
    }

    #[tokio::test]
    async fn failed_order_write_restocks_and_surfaces_the_writer_error() {
        let f = fixture_with(
            FakeOrders {
                fail_create: true,
                ..FakeOrders::default()
            },
            FakeProducts::default(),
        );
        let (p1, p2) = (f.p1.id_typed(), f.p2.id_typed());

        let err = f
            .service
            .execute(f.request(&[(p1, 2), (p2, 1)]))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::Store(StoreError::unavailable("orders table offline"))
        );
        let expected = vec![StockUpdate::new(p1, 2), StockUpdate::new(p2, 1)];
        assert_eq!(*f.products.updates.lock().unwrap(), vec![expected.clone()]);
        assert_eq!(*f.products.restocks.lock().unwrap(), vec![expected]);
        assert_eq!(f.products.stock_of(p1), 5);
        assert_eq!(f.products.stock_of(p2), 3);
    }

    #[tokio::test]
    async fn failed_restock_keeps_the_writer_error() {
        let f = fixture_with(
            FakeOrders {
                fail_create: true,
                ..FakeOrders::default()
            },
            FakeProducts {
                fail_restock: true,
                ..FakeProducts::default()
            },
        );
        let p1 = f.p1.id_typed();

        let err = f.service.execute(f.request(&[(p1, 2)])).await.unwrap_err();

        assert_eq!(
            err,
            ServiceError::Store(StoreError::unavailable("orders table offline"))
        );
        assert_eq!(f.products.restocks.lock().unwrap().len(), 1);
        assert_eq!(f.products.stock_of(p1), 3);
        assert!(f.orders.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn customer_lookup_failure_propagates_unchanged() {
        let f = fixture_full(
            FakeOrders::default(),
            FakeProducts::default(),
            FakeCustomers {
                fail_lookup: true,
                ..FakeCustomers::default()
            },
        );

        let err = f
            .service
            .execute(f.request(&[(f.p1.id_typed(), 1)]))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::Store(StoreError::unavailable("customers table offline"))
        );
        f.assert_untouched();
    }

    #[tokio::test]
    async fn product_lookup_failure_propagates_unchanged() {
        let f = fixture_with(
            FakeOrders::default(),
            FakeProducts {
                fail_lookup: true,
                ..FakeProducts::default()
            },
        );

        let err = f
            .service
            .execute(f.request(&[(f.p1.id_typed(), 1)]))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::Store(StoreError::unavailable("catalog offline"))
        );
        f.assert_untouched();
    }

    #[tokio::test]
    async fn empty_request_places_an_empty_order() {
        let f = fixture();

        let order = f.service.execute(f.request(&[])).await.unwrap();

        assert!(order.line_items().is_empty());
        assert_eq!(order.total(), Some(Price::ZERO));
        assert_eq!(*f.products.updates.lock().unwrap(), vec![Vec::<StockUpdate>::new()]);
        assert_eq!(f.orders.rows.lock().unwrap().len(), 1);
    }

    #[test]
    fn product_returned_twice_by_the_finder_is_unknown() {
        let p = Product::new(ProductId::new(), "P", Price::from_cents(500), 10);
        let requested = [
            RequestedProduct::new(p.id_typed(), 1),
            RequestedProduct::new(ProductId::new(), 1),
        ];

        let err = build_line_items(&requested, &[p.clone(), p]).unwrap_err();
        assert_eq!(err, DomainError::validation("unknown product"));
    }

    #[test]
    fn line_item_for_unrequested_product_is_unknown() {
        let stray = Product::new(ProductId::new(), "Stray", Price::from_cents(1), 1);
        let requested = [RequestedProduct::new(ProductId::new(), 1)];

        let err = build_line_items(&requested, &[stray]).unwrap_err();
        assert_eq!(err, DomainError::validation("unknown product"));
    }

    #[test]
    fn first_requested_entry_sets_line_quantity() {
        let p = Product::new(ProductId::new(), "P", Price::from_cents(500), 10);
        let requested = [
            RequestedProduct::new(p.id_typed(), 4),
            RequestedProduct::new(p.id_typed(), 7),
        ];

        let lines = build_line_items(&requested, &[p]).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 4);
    }
}
