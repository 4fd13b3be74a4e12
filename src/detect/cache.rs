use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Memoization table mapping a site's domain to its classified framework
///
/// Populated lazily on the first URL-pattern classification per domain and
/// held for the lifetime of a run. Owned by the run orchestrator and injected
/// into the detector; concurrent writers may race on a previously-unseen
/// domain, in which case last-writer-wins is acceptable since values for one
/// domain are expected to agree.
#[derive(Debug, Default)]
pub struct DomainCache {
    inner: Mutex<HashMap<String, String>>,
}

impl DomainCache {
    pub fn new() -> Self {
        DomainCache::default()
    }

    /// Cached framework name for a domain, if any
    pub fn get(&self, domain: &str) -> Option<String> {
        self.lock().get(domain).cloned()
    }

    /// Records a domain's classified framework
    pub fn insert(&self, domain: &str, framework: &str) {
        self.lock()
            .insert(domain.to_string(), framework.to_string());
    }

    /// Resets the cache globally
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of cached domains
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
