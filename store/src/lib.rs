//! # Atelier Store
//!
//! Storage plumbing for the Atelier portfolio store: the cached catalog
//! repository, the path-keyed mutual-exclusion gate, the crash-safe durable
//! writer, and the inventory service that orchestrates them.
//!
//! # Update Flow
//!
//! ```text
//! caller
//!   │
//!   ▼
//! PathLocks::acquire ──────── serializes callers per storage path
//!   │
//!   ▼
//! StoreRepository::load ───── cached catalog, or read + parse
//!   │
//!   ▼
//! Catalog::record_sale ────── pure in-memory transition (atelier-core)
//!   │
//!   ▼
//! StoreRepository::store ──── cache refreshed before durable write
//!   │
//!   ▼
//! writer::persist ─────────── write temp file, atomic rename
//!   │
//!   ▼
//! guard drop ──────────────── gate released on every exit path
//! ```
//!
//! The gate is the sole synchronization primitive protecting both the cache
//! entry and the durable document for a given path; nothing else in the
//! process may write the document without holding it. The guarantee is
//! in-process only: multiple server processes sharing one data file are
//! not protected.

pub mod error;
pub mod inventory;
pub mod path_lock;
pub mod repository;
pub mod writer;

// Re-export key types for convenience
pub use error::StoreError;
pub use inventory::InventoryService;
pub use path_lock::{PathGuard, PathLocks};
pub use repository::StoreRepository;
