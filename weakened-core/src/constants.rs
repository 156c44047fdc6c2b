//! Cache constants.

// ═══════════════════════════════════════════════════════════════════════════════
// PRIORITY TIERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Number of strong-store tiers (Low, Normal, High).
pub const PRIORITY_COUNT: usize = 3;

// ═══════════════════════════════════════════════════════════════════════════════
// MAINTENANCE SWEEPS
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum number of expirable keys visited by a single expiration sweep.
pub const DEFAULT_EXPIRATION_BATCH_SIZE: usize = 100;

/// Maximum number of weak keys visited by a single collection sweep.
pub const DEFAULT_COLLECTION_BATCH_SIZE: usize = 100;
