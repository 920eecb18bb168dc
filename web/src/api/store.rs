//! Storefront catalog API endpoints.
//!
//! - GET /api/store - The full product catalog (both locales)
//! - POST /api/store/reload - Drop the cached catalog

use crate::error::AppError;
use crate::state::AppState;
use atelier_core::Catalog;
use axum::{Json, extract::State};
use serde::Serialize;

/// The full catalog, as rendered by the public shop page.
///
/// # Errors
///
/// `500` when the catalog document cannot be read or parsed.
pub async fn get_store(State(state): State<AppState>) -> Result<Json<Catalog>, AppError> {
    let catalog = state
        .repository
        .load(state.inventory.data_path())
        .await
        .map_err(|e| AppError::internal("Failed to load store data").with_source(e.into()))?;
    Ok(Json(catalog))
}

/// Response after dropping the cached catalog.
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    /// Confirmation message
    pub message: String,
}

/// Drop the cached catalog so the next read goes back to durable storage.
///
/// Used after the data file was edited outside the server (restock,
/// manual fix-up).
pub async fn reload_store(State(state): State<AppState>) -> Json<ReloadResponse> {
    state.repository.invalidate(state.inventory.data_path());
    tracing::info!("store cache invalidated");
    Json(ReloadResponse {
        message: "Store cache cleared".to_string(),
    })
}
