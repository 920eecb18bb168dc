//! Cached access to the persisted catalog document.

use crate::error::StoreError;
use atelier_core::Catalog;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// In-memory cache of parsed catalogs, keyed by storage path.
///
/// After the first read the cache is the source of truth for the process:
/// subsequent loads return the cached value without touching durable
/// storage. [`StoreRepository::invalidate`] forces the next load back to
/// disk, to recover from an externally modified file and for test
/// isolation.
///
/// An instance is shared explicitly (e.g. through the HTTP state) rather
/// than held as hidden module-level state, so tests can substitute an
/// isolated repository.
#[derive(Debug, Default)]
pub struct StoreRepository {
    cache: Mutex<HashMap<PathBuf, Catalog>>,
}

impl StoreRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog for `path`: the cached value when present, otherwise
    /// read from durable storage, parsed, and cached.
    ///
    /// # Errors
    ///
    /// [`StoreError::Storage`] when the underlying read fails;
    /// [`StoreError::Parse`] when the bytes are not a well-formed catalog
    /// document.
    pub async fn load(&self, path: &Path) -> Result<Catalog, StoreError> {
        if let Some(cached) = self.cached(path) {
            return Ok(cached);
        }

        let bytes = tokio::fs::read(path).await?;
        let catalog: Catalog = serde_json::from_slice(&bytes)?;
        tracing::debug!(path = %path.display(), "catalog read from durable storage");

        self.store(path, catalog.clone());
        Ok(catalog)
    }

    /// Replace the cached catalog for `path`.
    ///
    /// Called after every successful mutation so later reads in the same
    /// process see the update without re-parsing.
    pub fn store(&self, path: &Path, catalog: Catalog) {
        self.lock_cache().insert(path.to_path_buf(), catalog);
    }

    /// Drop the cached catalog for `path`, forcing the next load back to
    /// durable storage.
    pub fn invalidate(&self, path: &Path) {
        self.lock_cache().remove(path);
    }

    /// Drop every cached catalog.
    pub fn clear(&self) {
        self.lock_cache().clear();
    }

    fn cached(&self, path: &Path) -> Option<Catalog> {
        self.lock_cache().get(path).cloned()
    }

    /// The cache is a plain map; it stays structurally sound even if a
    /// caller panicked, so poisoning is ignored.
    fn lock_cache(&self) -> MutexGuard<'_, HashMap<PathBuf, Catalog>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
