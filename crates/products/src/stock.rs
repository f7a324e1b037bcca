use serde::{Deserialize, Serialize};

use storefront_core::ProductId;

/// A stock movement for one product.
///
/// `ProductsRepository::update_quantity` subtracts `quantity`;
/// `ProductsRepository::restock` adds it back.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUpdate {
    pub id: ProductId,
    pub quantity: u32,
}

impl StockUpdate {
    pub fn new(id: ProductId, quantity: u32) -> Self {
        Self { id, quantity }
    }
}
