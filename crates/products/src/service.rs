//! Product creation.

use tracing::{debug, info};

use storefront_core::{DomainError, ServiceError, ServiceResult, StoreError};

use crate::product::{NewProduct, Product};
use crate::repository::ProductsRepository;

/// Adds products to the catalog. Product names are unique.
pub struct CreateProductService<P> {
    products: P,
}

impl<P: ProductsRepository> CreateProductService<P> {
    pub fn new(products: P) -> Self {
        Self { products }
    }

    #[tracing::instrument(skip(self, input), fields(name = %input.name), err)]
    pub async fn execute(&self, input: NewProduct) -> ServiceResult<Product> {
        let input = input.normalized()?;

        if self.products.find_by_name(&input.name).await?.is_some() {
            debug!(name = %input.name, "product creation rejected: name taken");
            return Err(name_taken());
        }

        let product = self.products.create(input).await.map_err(|e| match e {
            StoreError::Conflict(_) => name_taken(),
            other => other.into(),
        })?;
        info!(
            product_id = %product.id_typed(),
            price = %product.price(),
            quantity = product.quantity(),
            "product created"
        );
        Ok(product)
    }
}

fn name_taken() -> ServiceError {
    DomainError::conflict("product name already in use").into()
}
