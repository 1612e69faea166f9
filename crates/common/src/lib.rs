//! Common utilities and shared types for the faculty reporter.
//!
//! This crate provides foundational components used across all reporter crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **Storage**: Local file storage for profile images
//!
//! # Example
//!
//! ```no_run
//! use reporter_common::{Config, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     println!("Listening on port {}", config.server.port);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod storage;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use storage::{LocalStorage, StorageBackend, StoredFile};
