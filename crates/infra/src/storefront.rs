//! Wiring of the use-case services over the in-memory repositories.

use std::sync::Arc;

use storefront_customers::CreateCustomerService;
use storefront_orders::{CreateOrderService, FindOrderService};
use storefront_products::CreateProductService;

use crate::memory::{
    InMemoryCustomersRepository, InMemoryOrdersRepository, InMemoryProductsRepository,
};

pub type SharedCustomers = Arc<InMemoryCustomersRepository>;
pub type SharedProducts = Arc<InMemoryProductsRepository>;
pub type SharedOrders = Arc<InMemoryOrdersRepository>;

/// One set of in-memory repositories shared by every service built from it.
///
/// Services are cheap to build; each call hands out a new service holding
/// clones of the same `Arc`s, so all of them observe the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorefront {
    pub customers: SharedCustomers,
    pub products: SharedProducts,
    pub orders: SharedOrders,
}

impl InMemoryStorefront {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        customers: InMemoryCustomersRepository,
        products: InMemoryProductsRepository,
        orders: InMemoryOrdersRepository,
    ) -> Self {
        Self {
            customers: Arc::new(customers),
            products: Arc::new(products),
            orders: Arc::new(orders),
        }
    }

    pub fn create_customer(&self) -> CreateCustomerService<SharedCustomers> {
        CreateCustomerService::new(self.customers.clone())
    }

    pub fn create_product(&self) -> CreateProductService<SharedProducts> {
        CreateProductService::new(self.products.clone())
    }

    pub fn create_order(&self) -> CreateOrderService<SharedOrders, SharedProducts, SharedCustomers> {
        CreateOrderService::new(
            self.orders.clone(),
            self.products.clone(),
            self.customers.clone(),
        )
    }

    pub fn find_order(&self) -> FindOrderService<SharedOrders> {
        FindOrderService::new(self.orders.clone())
    }
}
