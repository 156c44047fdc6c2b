//! Error types for the weakened cache.
//!
//! Absent keys and reclaimed weak targets are not errors; lookups report
//! them as `None`. The variants here cover the conditions a caller must see.

use thiserror::Error;

/// Result type alias using `CacheError`.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Main error type for all cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    // ═══════════════════════════════════════════════════════════════════════════
    // LOOKUP ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Typed lookup requested a type the stored value is not.
    #[error("Type mismatch: requested {expected}, stored value is {found}")]
    TypeMismatch {
        /// Requested type name
        expected: &'static str,
        /// Stored type name
        found: &'static str,
    },

    /// The cache has been disposed and no longer accepts entries.
    #[error("Cache has been disposed")]
    Disposed,

    // ═══════════════════════════════════════════════════════════════════════════
    // PARSING ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Unknown priority name.
    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    /// Unknown expiration policy name.
    #[error("Invalid expiration policy: {0}")]
    InvalidPolicy(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CacheError {
    /// Returns true if a typed lookup hit an incompatible value.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, CacheError::TypeMismatch { .. })
    }

    /// Returns true if this error came from loading or validating configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(self, CacheError::ConfigError(_) | CacheError::JsonError(_))
    }
}
