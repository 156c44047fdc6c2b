//! Domain types for the weakened cache.
//!
//! - [`Priority`]: selects the strong-store tier an entry lives in
//! - [`ExpirationPolicy`]: what happens when a timed entry's deadline passes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::PRIORITY_COUNT;
use crate::error::CacheError;

// ═══════════════════════════════════════════════════════════════════════════════
// PRIORITY
// ═══════════════════════════════════════════════════════════════════════════════

/// Strong-store tier, ordered `Low < Normal < High`.
///
/// Lower tiers are demoted first by `weaken_up_to`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Priority {
    /// First to be weakened
    Low = 0,
    /// Default tier
    #[default]
    Normal = 1,
    /// Last to be weakened
    High = 2,
}

impl Priority {
    /// All tiers in probe order.
    pub const ALL: [Priority; PRIORITY_COUNT] = [Priority::Low, Priority::Normal, Priority::High];

    /// Index of this tier in the strong store.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Tiers from `Low` up to and including `self`.
    pub fn up_to(self) -> impl Iterator<Item = Priority> {
        Self::ALL.into_iter().take(self.index() + 1)
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            other => Err(CacheError::InvalidPriority(other.to_string())),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// EXPIRATION POLICY
// ═══════════════════════════════════════════════════════════════════════════════

/// Rule applied when a timed entry's deadline passes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpirationPolicy {
    /// Never expires
    #[default]
    None,
    /// Delete the entry outright
    Clear,
    /// Demote a strongly held entry to the weak store
    Weaken,
}

impl ExpirationPolicy {
    /// Returns true if entries under this policy are tracked for expiration.
    pub fn is_timed(self) -> bool {
        self != ExpirationPolicy::None
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            ExpirationPolicy::None => "none",
            ExpirationPolicy::Clear => "clear",
            ExpirationPolicy::Weaken => "weaken",
        }
    }
}

impl fmt::Display for ExpirationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpirationPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(ExpirationPolicy::None),
            "clear" => Ok(ExpirationPolicy::Clear),
            "weaken" => Ok(ExpirationPolicy::Weaken),
            other => Err(CacheError::InvalidPolicy(other.to_string())),
        }
    }
}
