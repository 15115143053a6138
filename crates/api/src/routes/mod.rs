//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                    - Welcome message
//! GET  /health              - Liveness check
//! GET  /test                - Store diagnostics (no side effects)
//!
//! # Catalog
//! GET  /api/products        - List products (up to 100)
//! POST /api/products        - Create a product
//! POST /api/seed            - Seed the demo catalog
//!
//! # Checkout
//! POST /api/checkout        - Price items and create a pending order
//! POST /api/confirm-payment - Confirm or fail a mock payment
//! ```

pub mod checkout;
pub mod diagnostics;
pub mod products;
pub mod seed;

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;

/// Build the full route table.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/test", get(diagnostics::status))
        .nest("/api", api_routes())
}

/// Create the `/api` JSON routes router.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list).post(products::create))
        .route("/seed", post(seed::seed))
        .route("/checkout", post(checkout::checkout))
        .route("/confirm-payment", post(checkout::confirm_payment))
}

/// Static welcome message.
#[derive(Debug, Serialize)]
pub struct Welcome {
    pub message: &'static str,
}

/// GET /
async fn welcome() -> Json<Welcome> {
    Json(Welcome {
        message: "Chocolaterie API",
    })
}
