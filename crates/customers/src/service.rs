//! Customer registration.

use tracing::{debug, info};

use storefront_core::{DomainError, ServiceError, ServiceResult, StoreError};

use crate::customer::{Customer, NewCustomer};
use crate::repository::CustomersRepository;

/// Registers customers, enforcing one account per email address.
pub struct CreateCustomerService<C> {
    customers: C,
}

impl<C: CustomersRepository> CreateCustomerService<C> {
    pub fn new(customers: C) -> Self {
        Self { customers }
    }

    #[tracing::instrument(skip(self, input), err)]
    pub async fn execute(&self, input: NewCustomer) -> ServiceResult<Customer> {
        let input = input.normalized()?;

        if self.customers.find_by_email(&input.email).await?.is_some() {
            debug!(email = %input.email, "customer registration rejected: email taken");
            return Err(email_taken());
        }

        // A concurrent registration can win between the lookup and the insert.
        let customer = self.customers.create(input).await.map_err(|e| match e {
            StoreError::Conflict(_) => email_taken(),
            other => other.into(),
        })?;
        info!(customer_id = %customer.id_typed(), "customer registered");
        Ok(customer)
    }
}

fn email_taken() -> ServiceError {
    DomainError::conflict("email already in use").into()
}
