//! # Atelier Core
//!
//! Domain model for the Atelier portfolio store: the bilingual product
//! catalog and the pure sale-recording transition.
//!
//! ## Core Concepts
//!
//! - **Product**: one sellable catalog entry with stock-tracking fields
//! - **Catalog**: the persisted document, one ordered product list per
//!   locale plus opaque passthrough keys
//! - **`SaleOutcome`**: the result of applying a sale to the catalog
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell: this crate performs no I/O. The
//!   storage plumbing (cache, path lock, durable writer) lives in
//!   `atelier-store` and drives these transitions while holding the gate
//!   for the catalog's storage path.
//! - Display fields are opaque: only `id`, `sold`, `inventory_quantity`
//!   and the `sales` audit log are modeled; everything else round-trips
//!   through serialization untouched.

pub mod catalog;
pub mod product;

// Re-export commonly used types
pub use catalog::{Catalog, Locale, SaleOutcome};
pub use product::Product;
