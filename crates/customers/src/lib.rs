//! Customers module.
//!
//! The customer record, the storage contract the order workflow looks customers
//! up through, and the registration use-case.

pub mod customer;
pub mod repository;
pub mod service;

pub use customer::{Customer, NewCustomer};
pub use repository::CustomersRepository;
pub use service::CreateCustomerService;
