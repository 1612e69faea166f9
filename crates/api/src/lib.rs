//! HTTP API layer for the faculty reporter.
//!
//! REST endpoints for authentication, reports, complaints, ratings,
//! assignments, monitoring, export, the academic directory, and the
//! public landing-page surface. Built on Axum 0.8.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::{auth_middleware, AppState};
