//! Error types for the storage layer.

use thiserror::Error;

/// Errors from loading or persisting the catalog document.
///
/// Both variants pass the underlying diagnostic through verbatim: callers
/// surface it for operational visibility, not as a stable contract to
/// pattern-match on beyond "something failed".
#[derive(Debug, Error)]
pub enum StoreError {
    /// The durable document is not well-formed JSON, or does not match the
    /// catalog layout. Carries the parser's diagnostic.
    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    /// Reading or writing durable storage failed (missing file, permission
    /// denied, I/O fault). Carries the underlying message.
    #[error("{0}")]
    Storage(#[from] std::io::Error),
}
