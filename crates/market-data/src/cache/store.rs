//! In-memory key/value store with per-entry TTL.
//!
//! Expiry is checked lazily: an entry past its TTL is treated as a miss and
//! removed on the read that finds it. Nothing scans the map proactively and
//! there is no capacity bound, so the map holds one entry per distinct key
//! requested during the process lifetime.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, warn};

use super::clock::{Clock, SystemClock};

/// A cached value and its freshness window.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    /// Fresh while `now - inserted_at < ttl`.
    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.inserted_at) >= self.ttl
    }
}

/// Thread-safe TTL store.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use albion_market_data::cache::CacheStore;
///
/// let store = CacheStore::new();
/// store.set("gold:24", vec![1u64, 2, 3], Duration::from_secs(300));
/// assert_eq!(store.get("gold:24"), Some(vec![1, 2, 3]));
/// assert_eq!(store.get("gold:48"), None);
/// ```
pub struct CacheStore<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> CacheStore<V> {
    /// Create a store backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a store backed by a custom clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Lock the entries mutex, recovering from poison if necessary.
    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            warn!("Cache store mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Return the value for `key` if present and fresh.
    ///
    /// An expired entry is evicted by this call.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut entries = self.lock_entries();

        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                debug!("Cache: evicted expired entry '{}'", key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            inserted_at: self.clock.now(),
            ttl,
        };
        self.lock_entries().insert(key.into(), entry);
    }

    /// Drop the entry for `key`, fresh or not.
    pub fn invalidate(&self, key: &str) {
        self.lock_entries().remove(key);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.lock_entries().clear();
    }

    /// Number of stored entries, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }
}

impl<V: Clone> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    const TTL: Duration = Duration::from_secs(180);

    fn store() -> (Arc<ManualClock>, CacheStore<String>) {
        let clock = Arc::new(ManualClock::new());
        let store = CacheStore::with_clock(clock.clone());
        (clock, store)
    }

    #[test]
    fn test_get_after_set() {
        let (_, store) = store();
        store.set("prices:T4_BAG", "quotes".to_string(), TTL);
        assert_eq!(store.get("prices:T4_BAG").as_deref(), Some("quotes"));
    }

    #[test]
    fn test_miss() {
        let (_, store) = store();
        assert!(store.get("prices:T4_BAG").is_none());
    }

    #[test]
    fn test_fresh_until_ttl() {
        let (clock, store) = store();
        store.set("k", "v".to_string(), TTL);

        clock.advance(TTL - Duration::from_millis(1));
        assert!(store.get("k").is_some());
    }

    #[test]
    fn test_expired_at_ttl_and_evicted() {
        let (clock, store) = store();
        store.set("k", "v".to_string(), TTL);

        clock.advance(TTL);
        assert_eq!(store.len(), 1);
        assert!(store.get("k").is_none());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_set_after_eviction_is_observable() {
        let (clock, store) = store();
        store.set("k", "old".to_string(), TTL);
        clock.advance(TTL * 2);
        assert!(store.get("k").is_none());

        store.set("k", "new".to_string(), TTL);
        assert_eq!(store.get("k").as_deref(), Some("new"));
    }

    #[test]
    fn test_expired_entries_linger_until_read() {
        let (clock, store) = store();
        store.set("a", "1".to_string(), Duration::from_secs(1));
        store.set("b", "2".to_string(), Duration::from_secs(1));
        clock.advance(Duration::from_secs(5));

        assert_eq!(store.len(), 2);
        assert!(store.get("a").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_replaces_and_restarts_ttl() {
        let (clock, store) = store();
        store.set("k", "first".to_string(), TTL);
        clock.advance(Duration::from_secs(170));
        store.set("k", "second".to_string(), TTL);
        clock.advance(Duration::from_secs(170));

        assert_eq!(store.get("k").as_deref(), Some("second"));
    }

    #[test]
    fn test_invalidate_and_clear() {
        let (_, store) = store();
        store.set("a", "1".to_string(), TTL);
        store.set("b", "2".to_string(), TTL);

        store.invalidate("a");
        assert!(store.get("a").is_none());
        assert!(store.get("b").is_some());

        store.clear();
        assert!(store.is_empty());
    }
}
