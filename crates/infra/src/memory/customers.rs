use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use storefront_core::{CustomerId, StoreError, StoreResult};
use storefront_customers::{Customer, CustomersRepository, NewCustomer};

use super::poisoned;

/// In-memory customer store. Emails are unique, like a unique index would make them.
#[derive(Debug, Default)]
pub struct InMemoryCustomersRepository {
    rows: RwLock<HashMap<CustomerId, Customer>>,
}

impl InMemoryCustomersRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records (ids kept as given).
    pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
        let rows = customers.into_iter().map(|c| (c.id_typed(), c)).collect();
        Self {
            rows: RwLock::new(rows),
        }
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.rows.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl CustomersRepository for InMemoryCustomersRepository {
    async fn find_by_id(&self, id: CustomerId) -> StoreResult<Option<Customer>> {
        let rows = self.rows.read().map_err(poisoned)?;
        Ok(rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Customer>> {
        let rows = self.rows.read().map_err(poisoned)?;
        Ok(rows.values().find(|c| c.email() == email).cloned())
    }

    async fn create(&self, input: NewCustomer) -> StoreResult<Customer> {
        let mut rows = self.rows.write().map_err(poisoned)?;
        if rows.values().any(|c| c.email() == input.email) {
            return Err(StoreError::conflict(format!(
                "customer email '{}' already exists",
                input.email
            )));
        }

        let customer = Customer::new(CustomerId::new(), input.name, input.email);
        rows.insert(customer.id_typed(), customer.clone());
        Ok(customer)
    }
}
