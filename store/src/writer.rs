//! Crash-safe persistence of the catalog document.

use crate::error::StoreError;
use atelier_core::Catalog;
use std::path::{Path, PathBuf};

/// Serialize `catalog` and atomically replace the document at `path`.
///
/// The serialized bytes are written to a temporary file adjacent to the
/// target (`<path>.tmp`), which is then renamed onto the real path. Any
/// reader of the real path therefore observes either the fully-previous or
/// the fully-new document, never a partial write; a crash mid-write
/// leaves at worst a stray temporary file behind.
///
/// # Errors
///
/// [`StoreError::Storage`] when the write or the rename faults.
pub async fn persist(path: &Path, catalog: &Catalog) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(catalog)?;
    let tmp = temp_path(path);

    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;

    tracing::debug!(path = %path.display(), "catalog persisted");
    Ok(())
}

/// The temporary sibling of `path`: the full path with `.tmp` appended,
/// so the rename stays within one file system.
fn temp_path(path: &Path) -> PathBuf {
    let mut raw = path.as_os_str().to_owned();
    raw.push(".tmp");
    PathBuf::from(raw)
}
