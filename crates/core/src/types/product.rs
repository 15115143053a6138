//! Product catalog shapes.
//!
//! A [`Product`] is the validated client-supplied shape; a [`ProductRecord`]
//! is the persisted shape with its store-assigned identifier exposed as a
//! plain `id` field.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ProductId;

/// Default stock quantity for a newly created product.
const DEFAULT_STOCK_QTY: i64 = 20;

/// Validation failure for a [`Product`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("price_cents must be >= 0 (got {0})")]
    NegativePrice(i64),
    #[error("cacao_percent must be between 0 and 100 (got {0})")]
    CacaoPercentOutOfRange(i64),
    #[error("stock_qty must be >= 0 (got {0})")]
    NegativeStockQty(i64),
}

/// A catalog product, without its store identifier.
///
/// Prices are integer minor currency units (cents); no floating-point
/// currency arithmetic anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product name.
    pub name: String,
    /// Product description.
    #[serde(default)]
    pub description: Option<String>,
    /// Price in cents.
    pub price_cents: i64,
    /// Product image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Cacao percentage (0-100).
    #[serde(default)]
    pub cacao_percent: Option<i64>,
    /// Whether the product is available for checkout.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Inventory quantity. Informational only: checkout neither checks nor
    /// decrements it.
    #[serde(default = "default_stock_qty")]
    pub stock_qty: i64,
    /// Tags for filtering.
    #[serde(default)]
    pub tags: Vec<String>,
}

const fn default_in_stock() -> bool {
    true
}

const fn default_stock_qty() -> i64 {
    DEFAULT_STOCK_QTY
}

impl Product {
    /// Validate field constraints.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: empty name, negative price,
    /// cacao percentage outside 0-100, or negative stock quantity.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        if self.price_cents < 0 {
            return Err(ProductValidationError::NegativePrice(self.price_cents));
        }
        if let Some(pct) = self.cacao_percent
            && !(0..=100).contains(&pct)
        {
            return Err(ProductValidationError::CacaoPercentOutOfRange(pct));
        }
        if self.stock_qty < 0 {
            return Err(ProductValidationError::NegativeStockQty(self.stock_qty));
        }
        Ok(())
    }
}

/// A persisted product with its store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Store-assigned identifier.
    pub id: ProductId,
    #[serde(flatten)]
    pub product: Product,
}
