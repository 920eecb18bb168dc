//! Router configuration for the Atelier server.
//!
//! Builds the complete Axum router with all endpoints.

use super::health::{health_check, readiness_check};
use crate::api::{inventory, store};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Configures all routes including:
/// - Health checks
/// - Storefront catalog endpoints
/// - The inventory update endpoint (webhook target)
///
/// # Arguments
///
/// - `state`: Application state to share with handlers
///
/// # Returns
///
/// Configured Axum router ready to serve requests.
pub fn build_router(state: AppState) -> Router {
    // API routes
    let api_routes = Router::new()
        .route("/store", get(store::get_store))
        .route("/store/inventory", post(inventory::update_inventory))
        .route("/store/reload", post(store::reload_store));

    Router::new()
        // Health checks
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        // API routes under /api prefix
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
