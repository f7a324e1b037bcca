use std::sync::RwLock;

use async_trait::async_trait;
use storefront_core::{ProductId, StoreError, StoreResult};
use storefront_products::{NewProduct, Product, ProductsRepository, StockUpdate};
use tracing::debug;

use super::poisoned;

/// In-memory product store.
///
/// Rows keep insertion order, and batch lookups return matches in that order.
/// Stock batches are staged on a copy and swapped in only if every movement
/// succeeds, so a rejected batch leaves stock untouched.
#[derive(Debug, Default)]
pub struct InMemoryProductsRepository {
    rows: RwLock<Vec<Product>>,
}

impl InMemoryProductsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records (ids kept as given).
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            rows: RwLock::new(products.into_iter().collect()),
        }
    }

    /// Current stock of a product, `None` if unknown.
    pub fn stock_of(&self, id: ProductId) -> StoreResult<Option<u32>> {
        let rows = self.rows.read().map_err(poisoned)?;
        Ok(rows.iter().find(|p| p.id_typed() == id).map(Product::quantity))
    }

    fn apply_batch(
        &self,
        updates: &[StockUpdate],
        movement: impl Fn(&mut Product, u32) -> StoreResult<()>,
    ) -> StoreResult<()> {
        let mut rows = self.rows.write().map_err(poisoned)?;
        let mut staged = rows.clone();

        for update in updates {
            let product = staged
                .iter_mut()
                .find(|p| p.id_typed() == update.id)
                .ok_or_else(|| StoreError::conflict(format!("unknown product {}", update.id)))?;
            if let Err(e) = movement(product, update.quantity) {
                debug!(product_id = %update.id, error = %e, "stock batch rejected");
                return Err(e);
            }
        }

        *rows = staged;
        Ok(())
    }
}

#[async_trait]
impl ProductsRepository for InMemoryProductsRepository {
    async fn find_all_by_id(&self, ids: &[ProductId]) -> StoreResult<Vec<Product>> {
        let rows = self.rows.read().map_err(poisoned)?;
        Ok(rows
            .iter()
            .filter(|p| ids.contains(&p.id_typed()))
            .cloned()
            .collect())
    }

    async fn update_quantity(&self, updates: &[StockUpdate]) -> StoreResult<()> {
        self.apply_batch(updates, |product, amount| {
            product.take_stock(amount).map_err(|_| {
                StoreError::conflict(format!(
                    "insufficient stock for product {}",
                    product.id_typed()
                ))
            })
        })
    }

    async fn restock(&self, updates: &[StockUpdate]) -> StoreResult<()> {
        self.apply_batch(updates, |product, amount| {
            product.return_stock(amount).map_err(|_| {
                StoreError::conflict(format!("stock overflow for product {}", product.id_typed()))
            })
        })
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Product>> {
        let rows = self.rows.read().map_err(poisoned)?;
        Ok(rows.iter().find(|p| p.name() == name).cloned())
    }

    async fn create(&self, input: NewProduct) -> StoreResult<Product> {
        let mut rows = self.rows.write().map_err(poisoned)?;
        if rows.iter().any(|p| p.name() == input.name) {
            return Err(StoreError::conflict(format!(
                "product name '{}' already exists",
                input.name
            )));
        }

        let product = Product::new(ProductId::new(), input.name, input.price, input.quantity);
        rows.push(product.clone());
        Ok(product)
    }
}
