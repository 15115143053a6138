//! Store diagnostics route.
//!
//! Purely informational: reports store connectivity and whether the two
//! store configuration environment variables are set. Never fails the
//! request; store problems surface as flags in the report.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

/// Diagnostic report for the document store.
#[derive(Debug, Serialize)]
pub struct DiagnosticsReport {
    /// Always "running" if this handler answered at all.
    pub backend: &'static str,
    /// Whether the store answered a connectivity probe.
    pub database_connected: bool,
    /// Whether the store answered a collection listing call.
    pub database_listable: bool,
    /// Whether `DATABASE_URL` is set in the environment.
    pub database_url_set: bool,
    /// Whether `DATABASE_NAME` is set in the environment.
    pub database_name_set: bool,
    /// First few collection names, empty if listing failed.
    pub collections: Vec<String>,
}

/// Report store connectivity and configuration status.
///
/// GET /test
pub async fn status(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    let store = state.store();

    let database_connected = store.ping().await.is_ok();
    let (database_listable, collections) = match store.collection_names().await {
        Ok(names) => (true, names),
        Err(_) => (false, Vec::new()),
    };

    Json(DiagnosticsReport {
        backend: "running",
        database_connected,
        database_listable,
        database_url_set: std::env::var_os("DATABASE_URL").is_some(),
        database_name_set: std::env::var_os("DATABASE_NAME").is_some(),
        collections,
    })
}
