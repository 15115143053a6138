//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server faults to Sentry
//! before responding to the client. All route handlers should return
//! `Result<T, AppError>`.
//!
//! Responses carry a JSON body of the form `{"detail": "<message>"}`. This
//! is a demo system: server faults echo the underlying error text in
//! `detail` rather than hiding it behind a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::{CatalogError, CheckoutError, SeedError};
use crate::store::StoreError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Checkout or payment confirmation failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Seeding failed.
    #[error("Seed error: {0}")]
    Seed(#[from] SeedError),

    /// Document store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Catalog(err) => match err {
                CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
                CatalogError::MissingAfterInsert(_) | CatalogError::Store(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Checkout(err) => match err {
                CheckoutError::ProductUnavailable(_)
                | CheckoutError::InvalidQuantity(_)
                | CheckoutError::InvalidClientSecret => StatusCode::BAD_REQUEST,
                CheckoutError::OrderNotFound => StatusCode::NOT_FOUND,
                CheckoutError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Seed(_) | Self::Store(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// The human-readable detail string sent to the client.
    fn detail(&self) -> String {
        match self {
            Self::Catalog(err) => err.to_string(),
            Self::Checkout(err) => err.to_string(),
            Self::Seed(err) => err.to_string(),
            Self::Store(err) => err.to_string(),
            Self::NotFound(msg) | Self::BadRequest(msg) | Self::Internal(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Capture server faults to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = ErrorBody {
            detail: self.detail(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
