//! Checkout and mock payment confirmation.
//!
//! The order state machine: checkout creates an order as `pending`;
//! confirmation moves it to `paid` or `failed`. `canceled` exists in the
//! status enum but nothing here produces it.
//!
//! Two races are known and kept for parity with the system this replaces,
//! rather than silently fixed:
//! - `compute_totals` reads the `in_stock` flag only; it never checks or
//!   decrements `stock_qty`, so concurrent checkouts of a scarce item can
//!   both succeed.
//! - `confirm_payment` does not require the order to still be `pending`;
//!   repeating the call overwrites the prior terminal status, last write
//!   wins.

use rand::{Rng, distr::Alphanumeric};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument};

use chocolaterie_core::{CustomerInfo, Order, OrderId, OrderItem, OrderRecord, OrderStatus, Product, ProductId};

use crate::store::{DocumentStore, StoreError, collections};

/// Length of the random portion of a mock client secret.
const CLIENT_SECRET_TOKEN_LEN: usize = 24;

/// A requested (product, quantity) pair.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Error type for checkout and confirmation.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The product does not exist or its `in_stock` flag is false.
    #[error("Product unavailable: {0}")]
    ProductUnavailable(ProductId),

    /// A requested quantity was below one.
    #[error("Quantity must be >= 1 for product {0}")]
    InvalidQuantity(ProductId),

    /// No order with the given id.
    #[error("Order not found")]
    OrderNotFound,

    /// The supplied client secret does not match the stored one.
    #[error("Invalid client secret")]
    InvalidClientSecret,

    /// Document store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Checkout operations over the `product` and `order` collections.
pub struct CheckoutService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Price the requested items against the live catalog.
    ///
    /// Each line snapshots the current unit price; later catalog changes do
    /// not affect existing orders. Returns the grand total and the prepared
    /// line items in request order.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::ProductUnavailable` naming the offending
    /// product if it is missing or out of stock,
    /// `CheckoutError::InvalidQuantity` for a zero quantity, and
    /// `CheckoutError::Store` for store failures.
    pub async fn compute_totals(
        &self,
        items: &[CheckoutItem],
    ) -> Result<(i64, Vec<OrderItem>), CheckoutError> {
        let mut total = 0i64;
        let mut prepared = Vec::with_capacity(items.len());

        for item in items {
            if item.quantity == 0 {
                return Err(CheckoutError::InvalidQuantity(item.product_id.clone()));
            }

            let product = self.fetch_product(&item.product_id).await?;
            let Some(product) = product.filter(|p| p.in_stock) else {
                return Err(CheckoutError::ProductUnavailable(item.product_id.clone()));
            };

            let line = OrderItem::new(item.product_id.clone(), item.quantity, product.price_cents);
            total += line.subtotal_cents;
            prepared.push(line);
        }

        Ok((total, prepared))
    }

    /// Price the request, persist a `pending` order with a fresh mock client
    /// secret, and return the stored record.
    ///
    /// # Errors
    ///
    /// Propagates every `compute_totals` error; returns
    /// `CheckoutError::Store` if persisting the order fails.
    #[instrument(skip(self, items, customer), fields(item_count = items.len()))]
    pub async fn checkout(
        &self,
        items: &[CheckoutItem],
        customer: Option<CustomerInfo>,
    ) -> Result<OrderRecord, CheckoutError> {
        let (total, prepared) = self.compute_totals(items).await?;
        let client_secret = generate_client_secret();

        let order = Order {
            items: prepared,
            currency: "usd".to_owned(),
            total_cents: total,
            status: OrderStatus::Pending,
            client_secret,
            customer,
        };

        let doc = serde_json::to_value(&order).map_err(StoreError::from)?;
        let id = self.store.insert(collections::ORDER, doc).await?;
        info!(order_id = %id, total_cents = total, "Order created");

        Ok(OrderRecord {
            id: OrderId::new(id),
            order,
        })
    }

    /// Validate the client secret and move the order to `paid` or `failed`.
    ///
    /// No guard on the current status: confirming an already-confirmed order
    /// re-applies and overwrites the stored status.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::OrderNotFound` for a missing order,
    /// `CheckoutError::InvalidClientSecret` on mismatch, and
    /// `CheckoutError::Store` for store failures.
    #[instrument(skip(self, client_secret), fields(order_id = %order_id))]
    pub async fn confirm_payment(
        &self,
        order_id: &OrderId,
        client_secret: &str,
        success: bool,
    ) -> Result<OrderStatus, CheckoutError> {
        let doc = self
            .store
            .find_by_id(collections::ORDER, order_id.as_str())
            .await?
            .ok_or(CheckoutError::OrderNotFound)?;

        let mut order: Order = serde_json::from_value(doc).map_err(StoreError::from)?;
        if order.client_secret != client_secret {
            return Err(CheckoutError::InvalidClientSecret);
        }

        let new_status = if success {
            OrderStatus::Paid
        } else {
            OrderStatus::Failed
        };
        order.status = new_status;

        let doc = serde_json::to_value(&order).map_err(StoreError::from)?;
        let replaced = self
            .store
            .replace(collections::ORDER, order_id.as_str(), doc)
            .await?;
        if !replaced {
            return Err(CheckoutError::OrderNotFound);
        }

        info!(status = %new_status, "Order status updated");
        Ok(new_status)
    }

    async fn fetch_product(&self, id: &ProductId) -> Result<Option<Product>, CheckoutError> {
        let Some(doc) = self
            .store
            .find_by_id(collections::PRODUCT, id.as_str())
            .await?
        else {
            return Ok(None);
        };

        let product: Product = serde_json::from_value(doc).map_err(StoreError::from)?;
        Ok(Some(product))
    }
}

/// Generate a fresh opaque mock payment token.
///
/// A correlation value compared by equality at confirmation time; it carries
/// no cryptographic integrity.
fn generate_client_secret() -> String {
    let token: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CLIENT_SECRET_TOKEN_LEN)
        .map(char::from)
        .collect();

    format!("mock_secret_{token}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    async fn insert_product(store: &MemoryStore, price_cents: i64, in_stock: bool) -> ProductId {
        let product = Product {
            name: "Praline Jewels".to_owned(),
            description: None,
            price_cents,
            image: None,
            cacao_percent: Some(64),
            in_stock,
            stock_qty: 120,
            tags: Vec::new(),
        };
        let doc = serde_json::to_value(&product).expect("serialize");
        let id = store
            .insert(collections::PRODUCT, doc)
            .await
            .expect("insert");
        ProductId::new(id)
    }

    #[tokio::test]
    async fn test_compute_totals_sums_line_subtotals() {
        let store = MemoryStore::new();
        let p1 = insert_product(&store, 1500, true).await;
        let p2 = insert_product(&store, 4200, true).await;

        let service = CheckoutService::new(&store);
        let items = vec![
            CheckoutItem {
                product_id: p1.clone(),
                quantity: 2,
            },
            CheckoutItem {
                product_id: p2.clone(),
                quantity: 1,
            },
        ];

        let (total, prepared) = service.compute_totals(&items).await.expect("totals");
        assert_eq!(total, 7200);
        assert_eq!(prepared.len(), 2);
        assert_eq!(prepared[0], OrderItem::new(p1, 2, 1500));
        assert_eq!(prepared[1], OrderItem::new(p2, 1, 4200));
    }

    #[tokio::test]
    async fn test_unknown_product_fails_naming_the_id() {
        let store = MemoryStore::new();
        let service = CheckoutService::new(&store);
        let items = vec![CheckoutItem {
            product_id: ProductId::new("no-such-product"),
            quantity: 1,
        }];

        let err = service.compute_totals(&items).await.expect_err("missing");
        assert_eq!(err.to_string(), "Product unavailable: no-such-product");
    }

    #[tokio::test]
    async fn test_out_of_stock_product_fails() {
        let store = MemoryStore::new();
        let id = insert_product(&store, 1500, false).await;

        let service = CheckoutService::new(&store);
        let items = vec![CheckoutItem {
            product_id: id.clone(),
            quantity: 1,
        }];

        let err = service.compute_totals(&items).await.expect_err("oos");
        assert!(matches!(err, CheckoutError::ProductUnavailable(p) if p == id));
    }

    #[tokio::test]
    async fn test_zero_quantity_rejected() {
        let store = MemoryStore::new();
        let id = insert_product(&store, 1500, true).await;

        let service = CheckoutService::new(&store);
        let items = vec![CheckoutItem {
            product_id: id,
            quantity: 0,
        }];

        let err = service.compute_totals(&items).await.expect_err("zero qty");
        assert!(matches!(err, CheckoutError::InvalidQuantity(_)));
    }

    #[tokio::test]
    async fn test_checkout_persists_pending_order_with_matching_total() {
        let store = MemoryStore::new();
        let id = insert_product(&store, 1500, true).await;

        let service = CheckoutService::new(&store);
        let record = service
            .checkout(
                &[CheckoutItem {
                    product_id: id,
                    quantity: 2,
                }],
                None,
            )
            .await
            .expect("checkout");

        assert_eq!(record.order.total_cents, 3000);
        assert_eq!(record.order.status, OrderStatus::Pending);
        assert!(record.order.client_secret.starts_with("mock_secret_"));
        assert!(record.order.total_is_consistent());

        // The persisted order matches the returned one
        let stored = store
            .find_by_id(collections::ORDER, record.id.as_str())
            .await
            .expect("find")
            .expect("order stored");
        let stored: Order = serde_json::from_value(stored).expect("deserialize");
        assert_eq!(stored, record.order);
    }

    #[tokio::test]
    async fn test_failed_checkout_persists_no_order() {
        let store = MemoryStore::new();
        let service = CheckoutService::new(&store);

        let result = service
            .checkout(
                &[CheckoutItem {
                    product_id: ProductId::new("missing"),
                    quantity: 1,
                }],
                None,
            )
            .await;
        assert!(result.is_err());
        assert_eq!(store.count(collections::ORDER).await.expect("count"), 0);
    }

    #[tokio::test]
    async fn test_empty_checkout_is_a_zero_total_order() {
        let store = MemoryStore::new();
        let service = CheckoutService::new(&store);

        let record = service.checkout(&[], None).await.expect("checkout");
        assert_eq!(record.order.total_cents, 0);
        assert_eq!(record.order.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_confirm_payment_success_and_failure() {
        let store = MemoryStore::new();
        let product = insert_product(&store, 1500, true).await;
        let service = CheckoutService::new(&store);

        let record = service
            .checkout(
                &[CheckoutItem {
                    product_id: product,
                    quantity: 1,
                }],
                None,
            )
            .await
            .expect("checkout");

        let status = service
            .confirm_payment(&record.id, &record.order.client_secret, true)
            .await
            .expect("confirm");
        assert_eq!(status, OrderStatus::Paid);

        // Re-confirmation with the opposite value silently overwrites
        let status = service
            .confirm_payment(&record.id, &record.order.client_secret, false)
            .await
            .expect("re-confirm");
        assert_eq!(status, OrderStatus::Failed);
    }

    #[tokio::test]
    async fn test_confirm_payment_rejects_wrong_secret() {
        let store = MemoryStore::new();
        let product = insert_product(&store, 1500, true).await;
        let service = CheckoutService::new(&store);

        let record = service
            .checkout(
                &[CheckoutItem {
                    product_id: product,
                    quantity: 1,
                }],
                None,
            )
            .await
            .expect("checkout");

        let err = service
            .confirm_payment(&record.id, "mock_secret_wrong", true)
            .await
            .expect_err("mismatch");
        assert!(matches!(err, CheckoutError::InvalidClientSecret));

        // Status unchanged
        let stored = store
            .find_by_id(collections::ORDER, record.id.as_str())
            .await
            .expect("find")
            .expect("order stored");
        let stored: Order = serde_json::from_value(stored).expect("deserialize");
        assert_eq!(stored.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_confirm_payment_missing_order() {
        let store = MemoryStore::new();
        let service = CheckoutService::new(&store);

        let err = service
            .confirm_payment(&OrderId::new("no-such-order"), "mock_secret_x", true)
            .await
            .expect_err("missing order");
        assert!(matches!(err, CheckoutError::OrderNotFound));
    }

    #[test]
    fn test_generated_secrets_are_prefixed_and_unique() {
        let a = generate_client_secret();
        let b = generate_client_secret();
        assert!(a.starts_with("mock_secret_"));
        assert_eq!(a.len(), "mock_secret_".len() + CLIENT_SECRET_TOKEN_LEN);
        assert_ne!(a, b);
    }
}
