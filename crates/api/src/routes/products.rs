//! Product catalog routes.

use axum::{Json, extract::State};

use chocolaterie_core::{Product, ProductRecord};

use crate::error::AppError;
use crate::services::CatalogService;
use crate::state::AppState;

/// List products.
///
/// GET /api/products
///
/// # Errors
///
/// Returns a server fault if the store is unreachable.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProductRecord>>, AppError> {
    let catalog = CatalogService::new(state.store());
    let products = catalog.list_products().await?;
    Ok(Json(products))
}

/// Create a product.
///
/// POST /api/products
///
/// # Errors
///
/// Returns a client error for shape violations and a server fault if the
/// record cannot be re-fetched after insertion.
pub async fn create(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> Result<Json<ProductRecord>, AppError> {
    let catalog = CatalogService::new(state.store());
    let record = catalog.create_product(product).await?;
    Ok(Json(record))
}
