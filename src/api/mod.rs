//! HTTP API — the JSON surface consumed by the web client.
//!
//! Exposes the repository modules as endpoints under `/api/`. The router
//! is composable — [`app_router`] returns a `Router` that can be mounted
//! on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod types;

pub use router::app_router;
pub use types::ApiContext;
