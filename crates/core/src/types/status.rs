//! Order status lifecycle.

use serde::{Deserialize, Serialize};

/// Payment status of an order.
///
/// An order is created as [`Pending`](Self::Pending) by checkout and moves
/// exactly once, via payment confirmation, to [`Paid`](Self::Paid) or
/// [`Failed`](Self::Failed).
///
/// [`Canceled`](Self::Canceled) is reserved for future use: it is a valid
/// stored value but no code path in this workspace produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    /// Reserved for future use; never produced by this workspace.
    Canceled,
}

impl OrderStatus {
    /// Whether the status is terminal (no further transitions expected).
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Paid => write!(f, "paid"),
            Self::Failed => write!(f, "failed"),
            Self::Canceled => write!(f, "canceled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            "canceled" => Ok(Self::Canceled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).expect("serialize"),
            "\"pending\""
        );
        let status: OrderStatus = serde_json::from_str("\"paid\"").expect("deserialize");
        assert_eq!(status, OrderStatus::Paid);
    }

    #[test]
    fn test_status_display_matches_from_str() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Paid,
            OrderStatus::Failed,
            OrderStatus::Canceled,
        ] {
            let parsed: OrderStatus = status.to_string().parse().expect("round trip");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_terminality() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(OrderStatus::Paid.is_terminal());
        assert!(OrderStatus::Failed.is_terminal());
        assert!(OrderStatus::Canceled.is_terminal());
    }
}
