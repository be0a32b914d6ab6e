//! Shared set of proxies that passed at least one probe

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// Set of good proxy identities (raw proxy lines).
///
/// Entries are only ever added. Every insert takes the lock for the insert
/// alone.
#[derive(Debug, Default)]
pub struct GoodProxySet {
    inner: Mutex<HashSet<String>>,
}

impl GoodProxySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a success for `identity`. Returns `true` if it was not yet present.
    pub fn record_success(&self, identity: &str) -> bool {
        let identity = identity.to_string();
        self.lock().insert(identity)
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.lock().contains(identity)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the current contents, in no particular order
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    // A panicking probe cannot leave a half-written HashSet insert behind,
    // so a poisoned lock still guards a consistent set.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
