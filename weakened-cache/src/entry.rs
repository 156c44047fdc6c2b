//! Strong and weak entry types with their expiration metadata.

use std::any::Any;
use std::rc::Rc;
use std::time::{Duration, Instant};

use weakened_core::ExpirationPolicy;

use crate::weak::WeakHandle;

/// Deadline plus the rule applied when it passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Expiry {
    /// `None` when the deadline is unrepresentable or no expiration was requested
    pub expires_at: Option<Instant>,
    pub policy: ExpirationPolicy,
}

impl Expiry {
    pub fn never() -> Self {
        Self {
            expires_at: None,
            policy: ExpirationPolicy::None,
        }
    }

    pub fn after(now: Instant, duration: Duration, policy: ExpirationPolicy) -> Self {
        Self {
            expires_at: now.checked_add(duration),
            policy,
        }
    }

    /// A deadline is due once it has been reached.
    pub fn is_due(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

/// Entry owned by a strong-store tier. Keeps its value alive.
pub(crate) struct StrongEntry {
    pub value: Rc<dyn Any>,
    pub type_name: &'static str,
    pub expiry: Expiry,
}

impl StrongEntry {
    pub fn new<T: Any>(value: Rc<T>, expiry: Expiry) -> Self {
        Self {
            value,
            type_name: std::any::type_name::<T>(),
            expiry,
        }
    }
}

/// Entry in the weak store. Observes its value without owning it.
pub(crate) struct WeakEntry {
    pub handle: WeakHandle,
    pub type_name: &'static str,
    pub expiry: Expiry,
}

impl From<StrongEntry> for WeakEntry {
    /// Demotes a strong entry. The strong reference is dropped here.
    fn from(entry: StrongEntry) -> Self {
        Self {
            handle: WeakHandle::observe(&entry.value),
            type_name: entry.type_name,
            expiry: entry.expiry,
        }
    }
}
