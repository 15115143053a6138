//! Order shapes: line items, customer record, and the order itself.

use serde::{Deserialize, Serialize};

use super::id::{OrderId, ProductId};
use super::status::OrderStatus;

/// A single order line, snapshotted at checkout time.
///
/// The unit price is captured from the catalog when the order is created and
/// is not linked to later catalog changes. Immutable once the order exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// The product this line refers to.
    pub product_id: ProductId,
    /// Quantity ordered (>= 1).
    pub quantity: u32,
    /// Unit price in cents at time of order.
    pub unit_price_cents: i64,
    /// `unit_price_cents * quantity`.
    pub subtotal_cents: i64,
}

impl OrderItem {
    /// Build a line item, computing the subtotal from price and quantity.
    #[must_use]
    pub fn new(product_id: ProductId, quantity: u32, unit_price_cents: i64) -> Self {
        Self {
            product_id,
            quantity,
            unit_price_cents,
            subtotal_cents: unit_price_cents * i64::from(quantity),
        }
    }
}

/// Optional shipping/contact record attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub address_line2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    "US".to_owned()
}

/// An order, without its store identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Line items in request order.
    pub items: Vec<OrderItem>,
    /// ISO currency code.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Sum of all item subtotals, in cents.
    pub total_cents: i64,
    /// Payment status.
    #[serde(default)]
    pub status: OrderStatus,
    /// Mock payment token, set at creation and never changed. An opaque
    /// correlation value for the confirmation step, not a real credential.
    pub client_secret: String,
    /// Optional customer record.
    #[serde(default)]
    pub customer: Option<CustomerInfo>,
}

fn default_currency() -> String {
    "usd".to_owned()
}

impl Order {
    /// Whether the stored total matches the sum of its item subtotals.
    #[must_use]
    pub fn total_is_consistent(&self) -> bool {
        self.total_cents == self.items.iter().map(|item| item.subtotal_cents).sum::<i64>()
    }
}

/// A persisted order with its store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Store-assigned identifier.
    pub id: OrderId,
    #[serde(flatten)]
    pub order: Order,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_item_computes_subtotal() {
        let item = OrderItem::new(ProductId::new("p1"), 3, 1500);
        assert_eq!(item.subtotal_cents, 4500);
    }

    #[test]
    fn test_order_item_quantity_one() {
        let item = OrderItem::new(ProductId::new("p1"), 1, 8900);
        assert_eq!(item.subtotal_cents, 8900);
    }

    #[test]
    fn test_total_consistency() {
        let order = Order {
            items: vec![
                OrderItem::new(ProductId::new("p1"), 2, 1500),
                OrderItem::new(ProductId::new("p2"), 1, 4200),
            ],
            currency: "usd".to_owned(),
            total_cents: 7200,
            status: OrderStatus::Pending,
            client_secret: "mock_secret_x".to_owned(),
            customer: None,
        };
        assert!(order.total_is_consistent());

        let mut inconsistent = order;
        inconsistent.total_cents = 9999;
        assert!(!inconsistent.total_is_consistent());
    }

    #[test]
    fn test_customer_country_defaults_to_us() {
        let customer: CustomerInfo =
            serde_json::from_str(r#"{"name": "Ada", "email": "ada@example.com"}"#)
                .expect("deserialize");
        assert_eq!(customer.country, "US");
        assert_eq!(customer.address_line1, None);
    }

    #[test]
    fn test_order_serde_round_trip() {
        let order = Order {
            items: vec![OrderItem::new(ProductId::new("p1"), 2, 1500)],
            currency: "usd".to_owned(),
            total_cents: 3000,
            status: OrderStatus::Pending,
            client_secret: "mock_secret_abc".to_owned(),
            customer: None,
        };
        let json = serde_json::to_string(&order).expect("serialize");
        let back: Order = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, order);
    }
}
