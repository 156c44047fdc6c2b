//! # Weakened Core
//!
//! Shared vocabulary for the weakened cache.
//!
//! This crate provides the building blocks used by the engine and the CLI:
//!
//! - **Types**: [`Priority`] tiers and [`ExpirationPolicy`] rules
//! - **Errors**: [`CacheError`] with a crate-wide [`Result`] alias
//! - **Config**: [`CacheConfig`] sweep batch sizes
//! - **Constants**: default batch limits and tier count
//! - **Traits**: the [`Clock`] seam used to read the current time
//!
//! ## Example
//!
//! ```rust
//! use weakened_core::{CacheConfig, Priority};
//!
//! let config = CacheConfig::from_json(r#"{"expiration_batch_size": 10}"#).unwrap();
//! assert_eq!(config.expiration_batch_size, 10);
//! assert!(Priority::Low < Priority::High);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod config;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use config::CacheConfig;
pub use constants::*;
pub use error::{CacheError, Result};
pub use traits::*;
pub use types::*;
