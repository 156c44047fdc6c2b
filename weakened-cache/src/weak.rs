//! Weak store and the handles it owns.
//!
//! A [`WeakHandle`] answers "is the value still alive, and if so what is it"
//! without holding an ownership share. The value is reclaimed when its last
//! outside [`Rc`] is dropped; the store only notices by polling.

use std::any::Any;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::{Rc, Weak};

use crate::entry::WeakEntry;

/// Non-owning observer of a cached value.
///
/// Holds a `Weak` allocation reference until [`release`](Self::release) is
/// called or the handle is dropped.
pub(crate) struct WeakHandle {
    target: Option<Weak<dyn Any>>,
}

impl WeakHandle {
    pub fn observe(value: &Rc<dyn Any>) -> Self {
        Self {
            target: Some(Rc::downgrade(value)),
        }
    }

    /// Returns the value if something else still owns it.
    pub fn upgrade(&self) -> Option<Rc<dyn Any>> {
        self.target.as_ref().and_then(Weak::upgrade)
    }

    /// True once the value has been reclaimed or the handle released.
    pub fn is_collected(&self) -> bool {
        self.target.as_ref().map_or(true, |weak| weak.strong_count() == 0)
    }

    /// Gives up the weak reference. Returns false if it was already released.
    pub fn release(&mut self) -> bool {
        self.target.take().is_some()
    }
}

/// Single key → weak entry mapping.
pub(crate) struct WeakStore<K> {
    entries: HashMap<K, WeakEntry>,
}

impl<K> WeakStore<K> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of entries whose target is still alive.
    pub fn live_count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| !entry.handle.is_collected())
            .count()
    }

    /// Releases every handle and empties the store. Returns how many were released.
    pub fn release_all(&mut self) -> usize {
        let released = self
            .entries
            .values_mut()
            .map(|entry| entry.handle.release())
            .filter(|released| *released)
            .count();
        self.entries.clear();
        released
    }
}

impl<K: Hash + Eq> WeakStore<K> {
    pub fn get(&self, key: &K) -> Option<&WeakEntry> {
        self.entries.get(key)
    }

    /// Inserts an entry, releasing the handle of any entry it replaces.
    ///
    /// Returns true if the key was already present.
    pub fn insert(&mut self, key: K, entry: WeakEntry) -> bool {
        match self.entries.insert(key, entry) {
            Some(mut old) => {
                old.handle.release();
                true
            }
            None => false,
        }
    }

    /// Removes an entry and releases its handle.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.entries.remove(key) {
            Some(mut entry) => {
                entry.handle.release();
                true
            }
            None => false,
        }
    }
}
