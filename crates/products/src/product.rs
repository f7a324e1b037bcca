use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, ProductId};

use crate::price::Price;

/// Catalog product with its current price and available stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Price,
    quantity: u32,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: Price, quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            quantity,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Units available for sale.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn has_stock_for(&self, requested: u32) -> bool {
        self.quantity >= requested
    }

    /// Remove `amount` units. Fails without changing state if stock would go negative.
    pub fn take_stock(&mut self, amount: u32) -> DomainResult<()> {
        self.quantity = self
            .quantity
            .checked_sub(amount)
            .ok_or_else(|| DomainError::validation("insufficient stock"))?;
        Ok(())
    }

    /// Add `amount` units back. Fails without changing state on overflow.
    pub fn return_stock(&mut self, amount: u32) -> DomainResult<()> {
        self.quantity = self
            .quantity
            .checked_add(amount)
            .ok_or_else(|| DomainError::validation("stock overflow"))?;
        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub quantity: u32,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: Price, quantity: u32) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }

    pub fn normalized(self) -> DomainResult<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("name must not be empty"));
        }
        Ok(Self { name, ..self })
    }
}
