//! The cache façade.

use std::any::{type_name, Any};
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use weakened_core::{CacheConfig, CacheError, Clock, ExpirationPolicy, Priority, Result, SystemClock};

use crate::entry::{Expiry, StrongEntry, WeakEntry};
use crate::tiers::TieredStore;
use crate::weak::WeakStore;
use crate::worklist::{SweepReport, Worklist};

/// Object cache whose entries can be demoted from strong to weak storage.
///
/// Strongly held values live in one of three [`Priority`] tiers and are kept
/// alive by the cache. Demoted values live in a weak store that only observes
/// them: once every outside [`Rc`] is dropped the value is freed and the cache
/// cleans up its bookkeeping on a later sweep.
///
/// Every `put` and `take` first runs a bounded expiration sweep and then a
/// bounded collection sweep, so no call scans the whole cache.
///
/// Not thread-safe. Values are `Rc`, so the cache is neither `Send` nor `Sync`.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use std::time::Duration;
/// use weakened_cache::{ExpirationPolicy, Priority, WeakenedCache};
///
/// let mut cache = WeakenedCache::new();
/// let report = Rc::new(String::from("quarterly"));
///
/// cache.put("report", report.clone(), Priority::Low).unwrap();
/// cache.weaken_up_to(Priority::Normal);
///
/// // Still reachable while someone else owns it
/// assert!(cache.take_as::<String>(&"report").unwrap().is_some());
///
/// drop(report);
/// assert!(cache.take(&"report").is_none());
/// ```
pub struct WeakenedCache<K> {
    strong: TieredStore<K>,
    weak: WeakStore<K>,
    /// Keys with a timed policy, strong or already demoted
    expirable_keys: Worklist<K>,
    /// Keys present in the weak store
    weak_keys: Worklist<K>,
    clock: Box<dyn Clock>,
    disposed: bool,
}

impl<K: Hash + Eq + Clone> WeakenedCache<K> {
    /// Creates a cache with default sweep batch sizes and the system clock.
    pub fn new() -> Self {
        Self::build(&CacheConfig::default(), Box::new(SystemClock))
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }

    /// Creates a cache with custom configuration and time source.
    pub fn with_clock(config: CacheConfig, clock: impl Clock + 'static) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(&config, Box::new(clock)))
    }

    fn build(config: &CacheConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            strong: TieredStore::new(),
            weak: WeakStore::new(),
            expirable_keys: Worklist::new(config.expiration_batch_size),
            weak_keys: Worklist::new(config.collection_batch_size),
            clock,
            disposed: false,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // PUBLIC OPERATIONS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Stores a value in the given tier with no expiration.
    ///
    /// Overwrites an entry for the same key in the same tier. Other tiers and
    /// the weak store are left alone.
    pub fn put<T: Any>(&mut self, key: K, value: Rc<T>, priority: Priority) -> Result<()> {
        self.insert(key, StrongEntry::new(value, Expiry::never()), priority)
    }

    /// Stores a value that expires `duration` from now under `policy`.
    ///
    /// With [`ExpirationPolicy::Weaken`] the entry is demoted to the weak store
    /// once due; with [`ExpirationPolicy::Clear`] it is deleted.
    pub fn put_with_expiration<T: Any>(
        &mut self,
        key: K,
        value: Rc<T>,
        priority: Priority,
        duration: Duration,
        policy: ExpirationPolicy,
    ) -> Result<()> {
        let expiry = Expiry::after(self.clock.now(), duration, policy);
        self.insert(key, StrongEntry::new(value, expiry), priority)
    }

    fn insert(&mut self, key: K, entry: StrongEntry, priority: Priority) -> Result<()> {
        if self.disposed {
            return Err(CacheError::Disposed);
        }
        self.maintain();

        if entry.expiry.policy.is_timed() {
            self.expirable_keys.push(key.clone());
        }
        self.strong.insert(priority, key, entry);
        Ok(())
    }

    /// Looks a key up without removing it.
    ///
    /// Strong tiers are probed `Low → Normal → High`, then the weak store.
    /// A weak entry whose value was reclaimed yields `None`; the entry itself
    /// is left for the collection sweep.
    pub fn take(&mut self, key: &K) -> Option<Rc<dyn Any>> {
        self.maintain();
        self.lookup(key).map(|(value, _)| value)
    }

    /// Typed [`take`](Self::take).
    ///
    /// Fails with [`CacheError::TypeMismatch`] if the stored value is not a `T`.
    pub fn take_as<T: Any>(&mut self, key: &K) -> Result<Option<Rc<T>>> {
        self.maintain();
        match self.lookup(key) {
            None => Ok(None),
            Some((value, found)) => value.downcast::<T>().map(Some).map_err(|_| {
                CacheError::TypeMismatch {
                    expected: type_name::<T>(),
                    found,
                }
            }),
        }
    }

    fn lookup(&self, key: &K) -> Option<(Rc<dyn Any>, &'static str)> {
        if let Some((_, entry)) = self.strong.find(key) {
            return Some((Rc::clone(&entry.value), entry.type_name));
        }
        self.weak
            .get(key)
            .and_then(|entry| entry.handle.upgrade().map(|value| (value, entry.type_name)))
    }

    /// Demotes every tier from `Low` up to and including `priority`.
    ///
    /// Expiration tracking is untouched; a demoted timed key is picked up by
    /// the expiration sweep's weak-store branch.
    pub fn weaken_up_to(&mut self, priority: Priority) {
        if self.disposed {
            return;
        }

        for tier in priority.up_to() {
            let entries = self.strong.take_tier(tier);
            let count = entries.len();
            for (key, entry) in entries {
                demote(&mut self.weak, &mut self.weak_keys, key, entry);
            }
            if count > 0 {
                debug!(tier = %tier, count, "Weakened tier");
            }
        }
    }

    /// Runs one bounded expiration sweep.
    ///
    /// Due strong entries are removed, and demoted if their policy is
    /// `Weaken`. Due weak entries stop being tracked, and are deleted if their
    /// policy is `Clear`. Keys with no timed entry left in either store, such
    /// as a timed entry overwritten by a plain `put`, are dropped as stale.
    pub fn clear_expired(&mut self) -> SweepReport {
        if self.disposed {
            return SweepReport::default();
        }

        let now = self.clock.now();
        let Self {
            strong,
            weak,
            expirable_keys,
            weak_keys,
            ..
        } = self;
        let mut demoted = 0usize;

        let report = expirable_keys.sweep(|key| {
            let timed = strong
                .find_timed(key)
                .map(|(tier, entry)| (tier, entry.expiry.is_due(now)));
            if let Some((tier, due)) = timed {
                if !due {
                    return false;
                }
                if let Some(entry) = strong.remove(tier, key) {
                    if entry.expiry.policy == ExpirationPolicy::Weaken {
                        demote(weak, weak_keys, key.clone(), entry);
                        demoted += 1;
                    }
                }
                return true;
            }

            // No tier holds a timed entry for this key
            match weak.get(key).map(|entry| entry.expiry) {
                Some(expiry) if expiry.policy.is_timed() && !expiry.is_due(now) => false,
                Some(expiry) => {
                    if expiry.policy == ExpirationPolicy::Clear {
                        weak.remove(key);
                    }
                    true
                }
                None => true,
            }
        });

        if report.removed > 0 {
            debug!(visited = report.visited, removed = report.removed, demoted, "Expiration sweep");
        }
        report
    }

    /// Runs one bounded collection sweep.
    ///
    /// Weak entries whose value has been reclaimed are deleted and their
    /// handles released. Live entries are never touched.
    pub fn clear_collected(&mut self) -> SweepReport {
        if self.disposed {
            return SweepReport::default();
        }

        let Self { weak, weak_keys, .. } = self;
        let report = weak_keys.sweep(|key| match weak.get(key) {
            Some(entry) if !entry.handle.is_collected() => false,
            Some(_) => {
                weak.remove(key);
                true
            }
            None => true,
        });

        if report.removed > 0 {
            debug!(visited = report.visited, removed = report.removed, "Collection sweep");
        }
        report
    }

    fn maintain(&mut self) {
        self.clear_expired();
        self.clear_collected();
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // INSPECTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Tier of the first strong match, probing `Low → Normal → High`.
    pub fn tier_of(&self, key: &K) -> Option<Priority> {
        self.strong.find(key).map(|(tier, _)| tier)
    }

    /// Returns true if any strong tier holds `key`.
    pub fn contains_strong(&self, key: &K) -> bool {
        self.tier_of(key).is_some()
    }

    /// Returns true if the weak store has an entry for `key`, live or not.
    pub fn contains_weak(&self, key: &K) -> bool {
        self.weak.get(key).is_some()
    }

    /// Returns true if `key` is on the expiration worklist. Linear in its length.
    pub fn is_expiration_tracked(&self, key: &K) -> bool {
        self.expirable_keys.contains(key)
    }
}

impl<K> WeakenedCache<K> {
    /// Releases every weak handle and drops all storage.
    ///
    /// Safe to call more than once. Also runs on drop.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }

        let released = self.weak.release_all();
        self.strong.clear();
        self.expirable_keys.clear();
        self.weak_keys.clear();
        self.disposed = true;

        debug!(released, "Disposed cache");
    }

    /// Returns true once [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Number of strong plus weak entries, including weak entries not yet collected.
    pub fn len(&self) -> usize {
        self.strong.len() + self.weak.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns cache statistics. Does not sweep.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            low: self.strong.tier_len(Priority::Low),
            normal: self.strong.tier_len(Priority::Normal),
            high: self.strong.tier_len(Priority::High),
            weak_entries: self.weak.len(),
            live_weak_entries: self.weak.live_count(),
            expirable_tracked: self.expirable_keys.len(),
            weak_tracked: self.weak_keys.len(),
        }
    }
}

impl<K: Hash + Eq + Clone> Default for WeakenedCache<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for WeakenedCache<K> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<K> fmt::Debug for WeakenedCache<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakenedCache")
            .field("stats", &self.stats())
            .field("disposed", &self.disposed)
            .finish()
    }
}

/// Moves a strong entry into the weak store.
///
/// A key replacing an existing weak entry is already on the weak worklist and
/// is not registered twice.
fn demote<K: Hash + Eq + Clone>(
    weak: &mut WeakStore<K>,
    weak_keys: &mut Worklist<K>,
    key: K,
    entry: StrongEntry,
) {
    if !weak.insert(key.clone(), WeakEntry::from(entry)) {
        weak_keys.push(key);
    }
}

/// Cache statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entries in the low tier
    pub low: usize,
    /// Entries in the normal tier
    pub normal: usize,
    /// Entries in the high tier
    pub high: usize,
    /// Weak entries, live or awaiting collection
    pub weak_entries: usize,
    /// Weak entries whose value is still alive
    pub live_weak_entries: usize,
    /// Length of the expiration worklist
    pub expirable_tracked: usize,
    /// Length of the collection worklist
    pub weak_tracked: usize,
}

impl CacheStats {
    /// Total strongly held entries.
    pub fn strong_entries(&self) -> usize {
        self.low + self.normal + self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;
    use weakened_core::ManualClock;

    #[derive(Debug, PartialEq)]
    struct SomeType(u32);

    #[derive(Debug, PartialEq)]
    struct OtherType;

    fn manual_cache() -> (WeakenedCache<&'static str>, ManualClock) {
        let clock = ManualClock::new();
        let cache = WeakenedCache::with_clock(CacheConfig::default(), clock.clone()).unwrap();
        (cache, clock)
    }

    fn weak_target(cache: &WeakenedCache<&'static str>, key: &'static str) -> Option<Rc<dyn Any>> {
        cache.weak.get(&key).and_then(|entry| entry.handle.upgrade())
    }

    fn same_object<T>(erased: &Rc<dyn Any>, value: &Rc<T>) -> bool {
        Rc::as_ptr(erased) as *const () == Rc::as_ptr(value) as *const ()
    }

    #[test_case(Priority::Low)]
    #[test_case(Priority::Normal)]
    #[test_case(Priority::High)]
    fn test_put_then_take_returns_same_object(priority: Priority) {
        let mut cache = WeakenedCache::new();
        let value = Rc::new(SomeType(1));

        cache.put("key1", value.clone(), priority).unwrap();

        let taken = cache.take(&"key1").unwrap();
        assert!(same_object(&taken, &value));
        assert_eq!(cache.tier_of(&"key1"), Some(priority));
    }

    #[test]
    fn test_take_does_not_remove() {
        let mut cache = WeakenedCache::new();
        cache.put("key1", Rc::new(SomeType(1)), Priority::Normal).unwrap();

        assert!(cache.take(&"key1").is_some());
        assert!(cache.take(&"key1").is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_take_missing_key() {
        let mut cache: WeakenedCache<&str> = WeakenedCache::new();
        assert!(cache.take(&"nope").is_none());
        assert!(cache.take_as::<SomeType>(&"nope").unwrap().is_none());
    }

    #[test]
    fn test_take_as_other_type_fails() {
        let mut cache = WeakenedCache::new();
        cache.put("key1", Rc::new(SomeType(1)), Priority::Normal).unwrap();

        let err = cache.take_as::<OtherType>(&"key1").unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(matches!(
            err,
            CacheError::TypeMismatch { found, .. } if found == type_name::<SomeType>()
        ));
    }

    #[test]
    fn test_take_as_matching_type() {
        let mut cache = WeakenedCache::new();
        let value = Rc::new(SomeType(9));
        cache.put("key1", value.clone(), Priority::High).unwrap();

        let taken = cache.take_as::<SomeType>(&"key1").unwrap().unwrap();
        assert!(Rc::ptr_eq(&taken, &value));
    }

    #[test]
    fn test_weaken_expiration_demotes_on_next_put() {
        let (mut cache, _clock) = manual_cache();
        let some = Rc::new(SomeType(1));

        cache
            .put_with_expiration("key1", some.clone(), Priority::Normal, Duration::ZERO, ExpirationPolicy::Weaken)
            .unwrap();
        cache.put("key2", Rc::new(OtherType), Priority::Low).unwrap();

        assert!(!cache.contains_strong(&"key1"));
        assert!(same_object(&weak_target(&cache, "key1").unwrap(), &some));
        assert!(!cache.is_expiration_tracked(&"key1"));
        assert_eq!(Rc::strong_count(&some), 1);
    }

    #[test]
    fn test_clear_expiration_removes_on_next_put() {
        let (mut cache, _clock) = manual_cache();
        let some = Rc::new(SomeType(1));

        cache
            .put_with_expiration("key1", some.clone(), Priority::Normal, Duration::ZERO, ExpirationPolicy::Clear)
            .unwrap();
        cache.put("key2", Rc::new(OtherType), Priority::Low).unwrap();

        assert!(!cache.contains_strong(&"key1"));
        assert!(!cache.contains_weak(&"key1"));
        assert!(!cache.is_expiration_tracked(&"key1"));
        assert_eq!(Rc::strong_count(&some), 1);
    }

    #[test]
    fn test_not_yet_due_stays_strong() {
        let (mut cache, clock) = manual_cache();
        cache
            .put_with_expiration("key1", Rc::new(SomeType(1)), Priority::Normal, Duration::from_secs(10), ExpirationPolicy::Clear)
            .unwrap();

        clock.advance(Duration::from_secs(9));
        assert!(cache.take(&"key1").is_some());
        assert!(cache.is_expiration_tracked(&"key1"));

        clock.advance(Duration::from_secs(1));
        assert!(cache.take(&"key1").is_none());
        assert!(!cache.is_expiration_tracked(&"key1"));
    }

    #[test]
    fn test_weaken_up_to_normal_keeps_only_high() {
        let mut cache = WeakenedCache::new();
        let first = Rc::new(SomeType(1));
        let second = Rc::new(SomeType(2));
        let third = Rc::new(SomeType(3));

        cache.put("key1", first.clone(), Priority::Low).unwrap();
        cache.put("key2", second.clone(), Priority::Normal).unwrap();
        cache.put("key3", third.clone(), Priority::High).unwrap();

        cache.weaken_up_to(Priority::Normal);

        assert_eq!(cache.tier_of(&"key3"), Some(Priority::High));
        assert!(!cache.contains_strong(&"key1"));
        assert!(!cache.contains_strong(&"key2"));
        assert!(same_object(&weak_target(&cache, "key1").unwrap(), &first));
        assert!(same_object(&weak_target(&cache, "key2").unwrap(), &second));

        let stats = cache.stats();
        assert_eq!(stats.strong_entries(), 1);
        assert_eq!(stats.weak_entries, 2);
        assert_eq!(stats.weak_tracked, 2);
    }

    #[test]
    fn test_reclaimed_weak_target_reads_empty_until_collected() {
        let mut cache = WeakenedCache::new();
        let value = Rc::new(SomeType(1));
        cache.put("key1", value.clone(), Priority::Low).unwrap();
        cache.weaken_up_to(Priority::Low);

        drop(value);

        // Lookup never removes; only the collection sweep does
        assert!(cache.lookup(&"key1").is_none());
        assert!(cache.contains_weak(&"key1"));

        cache.clear_collected();
        assert!(!cache.contains_weak(&"key1"));
        assert_eq!(cache.stats().weak_tracked, 0);
    }

    #[test]
    fn test_clear_collected_keeps_live_targets() {
        let mut cache = WeakenedCache::new();
        let value = Rc::new(SomeType(1));
        cache.put("key1", value.clone(), Priority::Low).unwrap();
        cache.weaken_up_to(Priority::High);

        for _ in 0..5 {
            assert_eq!(cache.clear_collected().removed, 0);
        }
        assert!(cache.contains_weak(&"key1"));
        assert!(cache.take(&"key1").is_some());
    }

    #[test]
    fn test_demoted_clear_entry_deleted_when_due() {
        let (mut cache, clock) = manual_cache();
        let value = Rc::new(SomeType(1));
        cache
            .put_with_expiration("key1", value.clone(), Priority::Low, Duration::from_secs(5), ExpirationPolicy::Clear)
            .unwrap();
        cache.weaken_up_to(Priority::Low);
        assert!(cache.is_expiration_tracked(&"key1"));

        clock.advance(Duration::from_secs(5));
        cache.clear_expired();

        assert!(!cache.contains_weak(&"key1"));
        assert!(!cache.is_expiration_tracked(&"key1"));
        assert_eq!(Rc::weak_count(&value), 0);
    }

    #[test]
    fn test_demoted_weaken_entry_only_untracked_when_due() {
        let (mut cache, clock) = manual_cache();
        let value = Rc::new(SomeType(1));
        cache
            .put_with_expiration("key1", value.clone(), Priority::Low, Duration::from_secs(5), ExpirationPolicy::Weaken)
            .unwrap();
        cache.weaken_up_to(Priority::Low);

        clock.advance(Duration::from_secs(5));
        cache.clear_expired();

        assert!(cache.contains_weak(&"key1"));
        assert!(!cache.is_expiration_tracked(&"key1"));
    }

    #[test]
    fn test_stale_expirable_key_dropped() {
        let (mut cache, _clock) = manual_cache();
        cache
            .put_with_expiration("key1", Rc::new(SomeType(1)), Priority::Low, Duration::from_secs(5), ExpirationPolicy::None)
            .unwrap();
        assert!(!cache.is_expiration_tracked(&"key1"));

        cache.expirable_keys.push("ghost");
        let report = cache.clear_expired();

        assert_eq!(report.removed, 1);
        assert!(!cache.is_expiration_tracked(&"ghost"));
    }

    #[test]
    fn test_timed_key_overwritten_by_plain_put_is_untracked() {
        let (mut cache, clock) = manual_cache();

        for _ in 0..50 {
            cache
                .put_with_expiration("key1", Rc::new(SomeType(1)), Priority::Normal, Duration::from_secs(1), ExpirationPolicy::Clear)
                .unwrap();
            cache.put("key1", Rc::new(SomeType(2)), Priority::Normal).unwrap();
        }

        clock.advance(Duration::from_secs(10));
        for _ in 0..20 {
            cache.clear_expired();
        }

        assert_eq!(cache.stats().expirable_tracked, 0);
        assert_eq!(cache.tier_of(&"key1"), Some(Priority::Normal));
        assert_eq!(*cache.take_as::<SomeType>(&"key1").unwrap().unwrap(), SomeType(2));
    }

    #[test]
    fn test_untimed_weak_entry_is_untracked() {
        let (mut cache, clock) = manual_cache();
        let value = Rc::new(SomeType(2));

        cache
            .put_with_expiration("key1", Rc::new(SomeType(1)), Priority::Low, Duration::from_secs(1), ExpirationPolicy::Clear)
            .unwrap();
        cache.put("key1", value.clone(), Priority::Low).unwrap();
        cache.weaken_up_to(Priority::Low);
        assert!(cache.is_expiration_tracked(&"key1"));

        clock.advance(Duration::from_secs(10));
        for _ in 0..20 {
            cache.clear_expired();
        }

        assert_eq!(cache.stats().expirable_tracked, 0);
        assert!(same_object(&weak_target(&cache, "key1").unwrap(), &value));
    }

    #[test]
    fn test_untimed_lower_tier_does_not_hide_due_entry() {
        let (mut cache, clock) = manual_cache();
        let timed = Rc::new(SomeType(3));
        let plain = Rc::new(SomeType(1));

        cache
            .put_with_expiration("key1", timed.clone(), Priority::High, Duration::from_secs(1), ExpirationPolicy::Clear)
            .unwrap();
        cache.put("key1", plain.clone(), Priority::Low).unwrap();

        clock.advance(Duration::from_secs(1));
        cache.clear_expired();

        let stats = cache.stats();
        assert_eq!(stats.high, 0);
        assert_eq!(stats.low, 1);
        assert_eq!(stats.expirable_tracked, 0);
        assert_eq!(Rc::strong_count(&timed), 1);
        assert_eq!(cache.tier_of(&"key1"), Some(Priority::Low));
    }

    #[test]
    fn test_same_key_in_two_tiers_probes_low_first() {
        let mut cache = WeakenedCache::new();
        let low = Rc::new(SomeType(1));
        let high = Rc::new(SomeType(2));

        cache.put("key1", high.clone(), Priority::High).unwrap();
        cache.put("key1", low.clone(), Priority::Low).unwrap();

        let taken = cache.take_as::<SomeType>(&"key1").unwrap().unwrap();
        assert!(Rc::ptr_eq(&taken, &low));
        assert_eq!(cache.stats().strong_entries(), 2);
    }

    #[test]
    fn test_weaken_same_key_twice_registers_once() {
        let mut cache = WeakenedCache::new();
        let first = Rc::new(SomeType(1));
        let second = Rc::new(SomeType(2));

        cache.put("key1", first.clone(), Priority::Low).unwrap();
        cache.weaken_up_to(Priority::Low);
        cache.put("key1", second.clone(), Priority::Low).unwrap();
        cache.weaken_up_to(Priority::Low);

        assert_eq!(cache.stats().weak_tracked, 1);
        assert_eq!(Rc::weak_count(&first), 0);
        assert!(same_object(&weak_target(&cache, "key1").unwrap(), &second));
    }

    #[test]
    fn test_dispose_releases_handles_and_is_idempotent() {
        let mut cache = WeakenedCache::new();
        let value = Rc::new(SomeType(1));
        cache.put("key1", value.clone(), Priority::Low).unwrap();
        cache.put("key2", Rc::new(SomeType(2)), Priority::High).unwrap();
        cache.weaken_up_to(Priority::Low);
        assert_eq!(Rc::weak_count(&value), 1);

        cache.dispose();
        cache.dispose();

        assert!(cache.is_disposed());
        assert!(cache.is_empty());
        assert_eq!(Rc::weak_count(&value), 0);
        assert!(cache.take(&"key2").is_none());
        assert!(matches!(
            cache.put("key3", Rc::new(SomeType(3)), Priority::Low),
            Err(CacheError::Disposed)
        ));
    }

    #[test]
    fn test_drop_releases_handles() {
        let value = Rc::new(SomeType(1));
        {
            let mut cache = WeakenedCache::new();
            cache.put("key1", value.clone(), Priority::Low).unwrap();
            cache.weaken_up_to(Priority::Low);
            assert_eq!(Rc::weak_count(&value), 1);
        }
        assert_eq!(Rc::weak_count(&value), 0);
        assert_eq!(Rc::strong_count(&value), 1);
    }

    #[test]
    fn test_with_config_rejects_zero_batch() {
        let result = WeakenedCache::<u32>::with_config(CacheConfig::with_batch_size(0));
        assert!(matches!(result, Err(CacheError::ConfigError(_))));
    }
}
