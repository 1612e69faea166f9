//! Core business logic for the faculty reporter.

pub mod services;

pub use services::*;
