//! Demo catalog seeding route.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::error::AppError;
use crate::services::{SeedOutcome, SeedService};
use crate::state::AppState;

/// Request body for seeding.
#[derive(Debug, Deserialize)]
pub struct SeedRequest {
    /// Delete the existing catalog and reseed unconditionally.
    #[serde(default)]
    pub force: bool,
}

/// Seed the demo catalog.
///
/// POST /api/seed
///
/// # Errors
///
/// Returns a server fault if any store call fails.
pub async fn seed(
    State(state): State<AppState>,
    Json(request): Json<SeedRequest>,
) -> Result<Json<SeedOutcome>, AppError> {
    let service = SeedService::new(state.store());
    let outcome = service.seed(request.force).await?;
    Ok(Json(outcome))
}
