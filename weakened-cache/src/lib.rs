//! Object cache that trades strict retention for memory pressure relief.
//!
//! Values are held strongly in priority tiers and can be demoted to a weak
//! store, either explicitly with [`WeakenedCache::weaken_up_to`] or when a
//! timed entry with [`ExpirationPolicy::Weaken`] comes due. Weakly held values
//! are freed as soon as nobody else owns them; the cache notices lazily.

mod cache;
mod entry;
mod tiers;
mod weak;
mod worklist;

pub use cache::{CacheStats, WeakenedCache};
pub use worklist::SweepReport;

pub use weakened_core::{
    CacheConfig, CacheError, Clock, ExpirationPolicy, ManualClock, Priority, Result, SystemClock,
};
