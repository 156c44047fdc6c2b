//! Round-robin worklists scanned in bounded batches.
//!
//! Both maintenance trackers (expiration and collection) share this shape:
//! an unordered list of keys plus a cursor that persists between sweeps.
//! Each sweep visits at most `batch_size` keys, so repeated sweeps cover the
//! whole list without any single call paying O(n).

use serde::Serialize;

/// Result of one bounded sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Keys visited
    pub visited: usize,
    /// Keys dropped from the worklist
    pub removed: usize,
}

/// Unordered key list with a persistent round-robin cursor.
///
/// The cursor is always in `[0, len)`, or `0` when the list is empty.
#[derive(Debug)]
pub(crate) struct Worklist<K> {
    keys: Vec<K>,
    cursor: usize,
    batch_size: usize,
}

impl<K> Worklist<K> {
    pub fn new(batch_size: usize) -> Self {
        Self {
            keys: Vec::new(),
            cursor: 0,
            batch_size,
        }
    }

    pub fn push(&mut self, key: K) {
        self.keys.push(key);
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.cursor = 0;
    }

    /// Visits up to `batch_size` keys starting at the cursor.
    ///
    /// `visit` returns true to drop the key. Dropped keys are swap-removed, so
    /// the cursor stays put and the swapped-in key is visited next. The budget
    /// is fixed from the length at the start of the sweep.
    pub fn sweep<F>(&mut self, mut visit: F) -> SweepReport
    where
        F: FnMut(&K) -> bool,
    {
        let mut report = SweepReport::default();
        let budget = self.batch_size.min(self.keys.len());

        while report.visited < budget && !self.keys.is_empty() {
            if self.cursor >= self.keys.len() {
                self.cursor = 0;
            }

            if visit(&self.keys[self.cursor]) {
                self.keys.swap_remove(self.cursor);
                report.removed += 1;
            } else {
                self.cursor += 1;
            }
            report.visited += 1;
        }

        if self.cursor >= self.keys.len() {
            self.cursor = 0;
        }

        report
    }
}

impl<K: PartialEq> Worklist<K> {
    /// Linear scan; meant for inspection, not the hot path.
    pub fn contains(&self, key: &K) -> bool {
        self.keys.contains(key)
    }
}
