//! # Atelier Web
//!
//! Axum HTTP layer for the Atelier portfolio store.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Extract data** from the request (JSON body)
//! 3. **Invoke the service** (`atelier-store`): gate → repository → sale
//!    transition → atomic persist
//! 4. **Map the outcome** to an HTTP response
//!
//! The handlers are thin adapters: all stock semantics live in
//! `atelier-core`/`atelier-store` and are tested there; this crate is
//! responsible only for the HTTP contract.

pub mod api;
pub mod config;
pub mod error;
pub mod server;
pub mod state;

// Re-export key types for convenience
pub use config::Config;
pub use error::AppError;
pub use server::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
