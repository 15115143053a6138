//! Demo catalog seeding.
//!
//! Idempotent by default: a non-empty catalog is left untouched unless the
//! caller forces a reseed, in which case every existing product is deleted
//! and the fixed demo set is inserted. Destructive under `force`, acceptable
//! only because it targets demo data.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument};

use chocolaterie_core::Product;

use crate::store::{DocumentStore, StoreError, collections};

/// Error type for seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a seeding call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedOutcome {
    /// Whether any records were inserted.
    pub seeded: bool,
    /// Product count after the call.
    pub count: i64,
}

/// Seeding operations over the `product` collection.
pub struct SeedService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> SeedService<'a> {
    /// Create a new seeding service.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Seed the demo catalog.
    ///
    /// With `force` false, a non-empty catalog is a no-op reporting the
    /// current count. With `force` true, all existing products are deleted
    /// first and the demo set is inserted unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Store` if any store call fails.
    #[instrument(skip(self))]
    pub async fn seed(&self, force: bool) -> Result<SeedOutcome, SeedError> {
        let count = self.store.count(collections::PRODUCT).await?;
        if count > 0 && !force {
            return Ok(SeedOutcome {
                seeded: false,
                count,
            });
        }

        if force {
            let deleted = self.store.delete_all(collections::PRODUCT).await?;
            info!(deleted, "Cleared existing products");
        }

        for product in demo_products() {
            let doc = serde_json::to_value(&product).map_err(StoreError::from)?;
            self.store.insert(collections::PRODUCT, doc).await?;
        }

        let count = self.store.count(collections::PRODUCT).await?;
        info!(count, "Seeding complete");

        Ok(SeedOutcome {
            seeded: true,
            count,
        })
    }
}

/// The fixed demo catalog: three luxury chocolate products.
#[must_use]
pub fn demo_products() -> Vec<Product> {
    vec![
        Product {
            name: "Grand Cru Truffle Box".to_owned(),
            description: Some(
                "Assortment of hand-rolled ganache truffles dusted with 24k gold.".to_owned(),
            ),
            price_cents: 8900,
            image: Some(
                "https://images.unsplash.com/photo-1541976076758-347942db1970?q=80&w=1200&auto=format&fit=crop"
                    .to_owned(),
            ),
            cacao_percent: Some(72),
            in_stock: true,
            stock_qty: 50,
            tags: vec!["truffles".to_owned(), "gold".to_owned(), "gift".to_owned()],
        },
        Product {
            name: "Single-Origin Noir Bar".to_owned(),
            description: Some(
                "Peruvian single-origin 85% cacao with notes of cherry and espresso.".to_owned(),
            ),
            price_cents: 1500,
            image: Some(
                "https://images.unsplash.com/photo-1499636136210-6f4ee915583e?q=80&w=1200&auto=format&fit=crop"
                    .to_owned(),
            ),
            cacao_percent: Some(85),
            in_stock: true,
            stock_qty: 200,
            tags: vec![
                "bar".to_owned(),
                "single-origin".to_owned(),
                "vegan".to_owned(),
            ],
        },
        Product {
            name: "Praline Jewels".to_owned(),
            description: Some(
                "Hazelnut praline bonbons finished with shimmering cocoa butter.".to_owned(),
            ),
            price_cents: 4200,
            image: Some(
                "https://images.unsplash.com/photo-1606313564200-e75d5e30476e?q=80&w=1200&auto=format&fit=crop"
                    .to_owned(),
            ),
            cacao_percent: Some(64),
            in_stock: true,
            stock_qty: 120,
            tags: vec![
                "bonbons".to_owned(),
                "praline".to_owned(),
                "assortment".to_owned(),
            ],
        },
    ]
}
