//! Priority-tiered strong store.

use std::collections::HashMap;
use std::hash::Hash;

use weakened_core::{Priority, PRIORITY_COUNT};

use crate::entry::StrongEntry;

/// One key → entry mapping per [`Priority`].
///
/// Keys are unique per tier only; the same key may sit in several tiers.
pub(crate) struct TieredStore<K> {
    tiers: [HashMap<K, StrongEntry>; PRIORITY_COUNT],
}

impl<K> TieredStore<K> {
    pub fn new() -> Self {
        Self {
            tiers: std::array::from_fn(|_| HashMap::new()),
        }
    }

    pub fn tier_len(&self, priority: Priority) -> usize {
        self.tiers[priority.index()].len()
    }

    pub fn len(&self) -> usize {
        self.tiers.iter().map(HashMap::len).sum()
    }

    /// Empties the tier and hands back its entries.
    pub fn take_tier(&mut self, priority: Priority) -> HashMap<K, StrongEntry> {
        std::mem::take(&mut self.tiers[priority.index()])
    }

    pub fn clear(&mut self) {
        self.tiers.iter_mut().for_each(HashMap::clear);
    }
}

impl<K: Hash + Eq> TieredStore<K> {
    /// Overwrites any entry for `key` in the same tier.
    pub fn insert(&mut self, priority: Priority, key: K, entry: StrongEntry) {
        self.tiers[priority.index()].insert(key, entry);
    }

    /// First match probing `Low → Normal → High`.
    pub fn find(&self, key: &K) -> Option<(Priority, &StrongEntry)> {
        Priority::ALL
            .into_iter()
            .find_map(|priority| self.tiers[priority.index()].get(key).map(|entry| (priority, entry)))
    }

    /// First match with a timed policy, probing `Low → Normal → High`.
    ///
    /// Untimed entries for the same key in lower tiers are skipped.
    pub fn find_timed(&self, key: &K) -> Option<(Priority, &StrongEntry)> {
        Priority::ALL.into_iter().find_map(|priority| {
            self.tiers[priority.index()]
                .get(key)
                .filter(|entry| entry.expiry.policy.is_timed())
                .map(|entry| (priority, entry))
        })
    }

    pub fn remove(&mut self, priority: Priority, key: &K) -> Option<StrongEntry> {
        self.tiers[priority.index()].remove(key)
    }
}
