//! Application state for the Atelier HTTP server.
//!
//! Contains the shared resources needed by HTTP handlers: the cached
//! catalog repository and the serialized inventory service.

use atelier_store::{InventoryService, StoreRepository};
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned (cheaply via `Arc`) for each request. The repository and the
/// inventory service wrap the same underlying cache, so a catalog read
/// through one observes updates made through the other.
#[derive(Clone)]
pub struct AppState {
    /// Cached catalog repository (read side)
    pub repository: Arc<StoreRepository>,
    /// Serialized inventory updates against the catalog document (write side)
    pub inventory: Arc<InventoryService>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(repository: Arc<StoreRepository>, inventory: Arc<InventoryService>) -> Self {
        Self {
            repository,
            inventory,
        }
    }
}
