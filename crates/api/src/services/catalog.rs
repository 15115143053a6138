//! Catalog service: list and create product records.

use serde_json::Value;
use thiserror::Error;
use tracing::instrument;

use chocolaterie_core::{Product, ProductId, ProductRecord, ProductValidationError};

use crate::store::{DocumentStore, StoreError, collections};

/// Fixed listing limit; there is no pagination beyond it.
pub const MAX_LISTED_PRODUCTS: i64 = 100;

/// Error type for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Client-supplied product failed shape validation.
    #[error("{0}")]
    Validation(#[from] ProductValidationError),

    /// The record could not be re-fetched immediately after insertion.
    /// A server fault, not a client error.
    #[error("Product not found after creation: {0}")]
    MissingAfterInsert(String),

    /// Document store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Catalog operations over the `product` collection.
pub struct CatalogService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// List up to [`MAX_LISTED_PRODUCTS`] products in insertion order, each
    /// with its store identifier exposed as a plain `id` field.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Store` if the store call fails or a stored
    /// document does not deserialize as a product.
    pub async fn list_products(&self) -> Result<Vec<ProductRecord>, CatalogError> {
        let docs = self
            .store
            .list(collections::PRODUCT, MAX_LISTED_PRODUCTS)
            .await?;

        let mut products = Vec::with_capacity(docs.len());
        for (id, doc) in docs {
            products.push(record_from_doc(id, doc)?);
        }

        Ok(products)
    }

    /// Validate and persist a product, returning the stored record.
    ///
    /// The stored shape is re-fetched after insertion; a miss there is a
    /// server fault.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` for shape violations,
    /// `CatalogError::MissingAfterInsert` if the re-fetch misses, and
    /// `CatalogError::Store` for store failures.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create_product(&self, product: Product) -> Result<ProductRecord, CatalogError> {
        product.validate()?;

        let doc = serde_json::to_value(&product).map_err(StoreError::from)?;
        let id = self.store.insert(collections::PRODUCT, doc).await?;

        let stored = self
            .store
            .find_by_id(collections::PRODUCT, &id)
            .await?
            .ok_or_else(|| CatalogError::MissingAfterInsert(id.clone()))?;

        tracing::info!(product_id = %id, "Product created");
        record_from_doc(id, stored)
    }
}

fn record_from_doc(id: String, doc: Value) -> Result<ProductRecord, CatalogError> {
    let product: Product = serde_json::from_value(doc).map_err(StoreError::from)?;
    Ok(ProductRecord {
        id: ProductId::new(id),
        product,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn noir_bar() -> Product {
        Product {
            name: "Single-Origin Noir Bar".to_owned(),
            description: None,
            price_cents: 1500,
            image: None,
            cacao_percent: Some(85),
            in_stock: true,
            stock_qty: 200,
            tags: vec!["bar".to_owned()],
        }
    }

    #[tokio::test]
    async fn test_create_then_list_round_trip() {
        let store = MemoryStore::new();
        let catalog = CatalogService::new(&store);

        let created = catalog.create_product(noir_bar()).await.expect("create");
        assert!(!created.id.as_str().is_empty());
        assert_eq!(created.product, noir_bar());

        let listed = catalog.list_products().await.expect("list");
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_product() {
        let store = MemoryStore::new();
        let catalog = CatalogService::new(&store);

        let mut product = noir_bar();
        product.price_cents = -100;

        let err = catalog.create_product(product).await.expect_err("invalid");
        assert!(matches!(err, CatalogError::Validation(_)));

        // Nothing persisted on validation failure
        assert!(catalog.list_products().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_list_empty_catalog() {
        let store = MemoryStore::new();
        let catalog = CatalogService::new(&store);
        assert!(catalog.list_products().await.expect("list").is_empty());
    }
}
