//! Cache configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_COLLECTION_BATCH_SIZE, DEFAULT_EXPIRATION_BATCH_SIZE};
use crate::error::{CacheError, Result};

/// Maintenance sweep configuration.
///
/// Every public cache operation visits at most this many worklist keys per
/// tracker, which bounds its cost independent of cache size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Keys visited per expiration sweep
    pub expiration_batch_size: usize,
    /// Keys visited per collection sweep
    pub collection_batch_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            expiration_batch_size: DEFAULT_EXPIRATION_BATCH_SIZE,
            collection_batch_size: DEFAULT_COLLECTION_BATCH_SIZE,
        }
    }
}

impl CacheConfig {
    /// Uses the same batch size for both sweeps.
    pub fn with_batch_size(batch_size: usize) -> Self {
        Self {
            expiration_batch_size: batch_size,
            collection_batch_size: batch_size,
        }
    }

    /// Parses and validates a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that both sweeps make progress.
    pub fn validate(&self) -> Result<()> {
        if self.expiration_batch_size == 0 {
            return Err(CacheError::ConfigError(
                "expiration_batch_size must be greater than zero".into(),
            ));
        }
        if self.collection_batch_size == 0 {
            return Err(CacheError::ConfigError(
                "collection_batch_size must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
