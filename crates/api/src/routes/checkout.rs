//! Checkout and payment confirmation routes.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use chocolaterie_core::{CustomerInfo, OrderId, OrderStatus};

use crate::error::AppError;
use crate::services::{CheckoutItem, CheckoutService};
use crate::state::AppState;

/// Request body for checkout.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
    #[serde(default)]
    pub customer: Option<CustomerInfo>,
}

/// Response from a successful checkout.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order_id: OrderId,
    pub client_secret: String,
    pub amount_cents: i64,
    pub currency: String,
    pub status: OrderStatus,
}

/// Price the requested items and create a pending order.
///
/// POST /api/checkout
///
/// # Errors
///
/// Returns a client error naming the product id if a requested product is
/// missing or out of stock; a server fault if persisting the order fails.
pub async fn checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let service = CheckoutService::new(state.store());
    let record = service.checkout(&request.items, request.customer).await?;

    Ok(Json(CheckoutResponse {
        order_id: record.id,
        client_secret: record.order.client_secret,
        amount_cents: record.order.total_cents,
        currency: record.order.currency,
        status: record.order.status,
    }))
}

/// Request body for payment confirmation.
#[derive(Debug, Deserialize)]
pub struct ConfirmPaymentRequest {
    pub order_id: OrderId,
    pub client_secret: String,
    #[serde(default = "default_success")]
    pub success: bool,
}

const fn default_success() -> bool {
    true
}

/// Response from payment confirmation.
#[derive(Debug, Serialize)]
pub struct ConfirmPaymentResponse {
    pub order_id: OrderId,
    pub status: OrderStatus,
}

/// Confirm or fail a mock payment.
///
/// POST /api/confirm-payment
///
/// # Errors
///
/// Returns not-found for a missing order and a client error for a
/// mismatched client secret.
pub async fn confirm_payment(
    State(state): State<AppState>,
    Json(request): Json<ConfirmPaymentRequest>,
) -> Result<Json<ConfirmPaymentResponse>, AppError> {
    let service = CheckoutService::new(state.store());
    let status = service
        .confirm_payment(&request.order_id, &request.client_secret, request.success)
        .await?;

    Ok(Json(ConfirmPaymentResponse {
        order_id: request.order_id,
        status,
    }))
}
