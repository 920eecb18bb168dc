//! HTTP server wiring: router and health endpoints.

pub mod health;
pub mod routes;

pub use routes::build_router;
