//! Product entity and input shapes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use wares_core::{CatalogError, CatalogResult, ProductId};

/// A persisted catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    /// Exact decimal, never negative.
    pub price: Decimal,
    pub stock_quantity: u32,
}

/// Input shape for create and update.
///
/// Carries every mutable field of a product; the id is assigned by the store
/// on create and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: u32,
}

impl NewProduct {
    /// Reject inputs the store must never accept: blank names and negative
    /// prices. The API layer validates too, but the store is not allowed to
    /// trust it.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::validation("product name must not be blank"));
        }
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(CatalogError::validation("product price must not be negative"));
        }
        Ok(())
    }

    /// Materialize a product with the given id.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            stock_quantity: self.stock_quantity,
        }
    }
}
