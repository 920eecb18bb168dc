//! The inventory update engine.
//!
//! Orchestrates one sale end to end: acquire the path-keyed gate, load the
//! catalog through the repository cache, apply the pure sale transition,
//! refresh the cache, persist durably. Every step runs while the gate is
//! held, so for one catalog document all updates are totally ordered and
//! none observes stale state; the admission check in
//! [`Catalog::record_sale`] therefore guarantees at most one successful
//! decrement per unit of inventory.
//!
//! [`Catalog::record_sale`]: atelier_core::Catalog::record_sale

use crate::error::StoreError;
use crate::path_lock::PathLocks;
use crate::repository::StoreRepository;
use crate::writer;
use atelier_core::SaleOutcome;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Serialized inventory updates against one catalog document.
#[derive(Debug)]
pub struct InventoryService {
    repository: Arc<StoreRepository>,
    locks: PathLocks,
    data_path: PathBuf,
}

impl InventoryService {
    /// Creates a service mutating the catalog document at `data_path`.
    #[must_use]
    pub fn new(repository: Arc<StoreRepository>, data_path: PathBuf) -> Self {
        Self {
            repository,
            locks: PathLocks::new(),
            data_path,
        }
    }

    /// Storage path of the catalog document this service mutates.
    #[must_use]
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Record one sale against the product with the given id.
    ///
    /// `payment_event_id` (typically the identifier of the payment event
    /// that triggered the sale) is appended to the product's audit log
    /// when provided. The log is not consulted to reject duplicates: a
    /// redelivered event decrements again while stock remains.
    ///
    /// [`SaleOutcome::NotFound`] and [`SaleOutcome::AlreadySold`] perform
    /// no write, to the cache or to durable storage.
    ///
    /// # Errors
    ///
    /// [`StoreError`] when the catalog cannot be read, parsed, or
    /// persisted. A persist failure returns the error *after* the cache
    /// was refreshed: the in-memory catalog is then ahead of durable
    /// storage, and later loads in this process see the decrement even
    /// though it was never durably saved. The mutation is not rolled back.
    pub async fn update_inventory_item(
        &self,
        id: &str,
        payment_event_id: Option<&str>,
    ) -> Result<SaleOutcome, StoreError> {
        let _guard = self.locks.acquire(&self.data_path).await;

        let mut catalog = self.repository.load(&self.data_path).await?;
        let outcome = catalog.record_sale(id, payment_event_id);

        match &outcome {
            SaleOutcome::Sold(product) => {
                // Cache first, then durable storage; a persist fault leaves
                // the cache ahead of the file.
                self.repository.store(&self.data_path, catalog.clone());
                writer::persist(&self.data_path, &catalog).await?;

                tracing::info!(
                    product_id = %product.id,
                    remaining = product.inventory_quantity,
                    sold_out = product.sold,
                    "inventory updated"
                );
            }
            SaleOutcome::AlreadySold(product) => {
                tracing::warn!(
                    product_id = %product.id,
                    "sale rejected: no remaining inventory"
                );
            }
            SaleOutcome::NotFound => {
                tracing::warn!(product_id = %id, "sale rejected: unknown product");
            }
        }

        Ok(outcome)
    }
}
