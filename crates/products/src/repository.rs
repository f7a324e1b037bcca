//! Storage contract for products and their stock.

use std::sync::Arc;

use async_trait::async_trait;
use storefront_core::{ProductId, StoreResult};

use crate::product::{NewProduct, Product};
use crate::stock::StockUpdate;

#[async_trait]
pub trait ProductsRepository: Send + Sync {
    /// Batch lookup. Returns only the products that exist, each once, in no
    /// guaranteed order relative to `ids`.
    async fn find_all_by_id(&self, ids: &[ProductId]) -> StoreResult<Vec<Product>>;

    /// Decrement stock for every update. The batch is applied entirely or not at all.
    async fn update_quantity(&self, updates: &[StockUpdate]) -> StoreResult<()>;

    /// Increment stock for every update; undoes a previous `update_quantity`.
    async fn restock(&self, updates: &[StockUpdate]) -> StoreResult<()>;

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Product>>;

    /// Persist a new product and assign its id.
    async fn create(&self, input: NewProduct) -> StoreResult<Product>;
}

#[async_trait]
impl<S> ProductsRepository for Arc<S>
where
    S: ProductsRepository + ?Sized,
{
    async fn find_all_by_id(&self, ids: &[ProductId]) -> StoreResult<Vec<Product>> {
        (**self).find_all_by_id(ids).await
    }

    async fn update_quantity(&self, updates: &[StockUpdate]) -> StoreResult<()> {
        (**self).update_quantity(updates).await
    }

    async fn restock(&self, updates: &[StockUpdate]) -> StoreResult<()> {
        (**self).restock(updates).await
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Product>> {
        (**self).find_by_name(name).await
    }

    async fn create(&self, input: NewProduct) -> StoreResult<Product> {
        (**self).create(input).await
    }
}
