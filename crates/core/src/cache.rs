//! Bounded, time-expiring result cache.
//!
//! Freshness is only checked on read; stale entries stay resident until they
//! are overwritten or pushed out by capacity pressure. Eviction removes the
//! oldest *inserted* key, so this is FIFO, not LRU: reading an entry does not
//! protect it.

use std::collections::{HashMap, VecDeque};
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

use crate::MetadataResult;

#[derive(Debug, Clone)]
struct CacheEntry {
    data: MetadataResult,
    timestamp: Instant,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    /// Keys in first-insertion order. Overwrites keep their slot.
    order: VecDeque<String>,
}

/// Process-lifetime cache keyed by normalized URL.
///
/// Safe to share between tasks; concurrent misses for the same URL may both
/// store, last write wins.
#[derive(Debug)]
pub struct MetadataCache {
    state: RwLock<CacheState>,
    capacity: usize,
    ttl: Duration,
}

impl MetadataCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self { state: RwLock::new(CacheState::default()), capacity, ttl }
    }

    /// Returns the cached result when present and younger than the TTL.
    pub fn lookup(&self, url: &str) -> Option<MetadataResult> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let entry = state.entries.get(url)?;
        if entry.timestamp.elapsed() < self.ttl { Some(entry.data.clone()) } else { None }
    }

    /// Inserts or overwrites `url`, evicting the oldest-inserted key when a
    /// new key would exceed capacity.
    pub fn store(&self, url: &str, data: MetadataResult) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let entry = CacheEntry { data, timestamp: Instant::now() };

        if let Some(existing) = state.entries.get_mut(url) {
            *existing = entry;
            return;
        }

        if self.capacity == 0 {
            return;
        }

        while state.entries.len() >= self.capacity {
            match state.order.pop_front() {
                Some(oldest) => {
                    state.entries.remove(&oldest);
                }
                None => break,
            }
        }

        state.order.push_back(url.to_string());
        state.entries.insert(url.to_string(), entry);
    }

    /// Number of resident entries, stale ones included.
    pub fn len(&self) -> usize {
        self.state.read().unwrap_or_else(PoisonError::into_inner).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str) -> MetadataResult {
        MetadataResult::new(title, "", "/placeholder.svg")
    }

    #[test]
    fn test_lookup_miss() {
        let cache = MetadataCache::new(10, Duration::from_secs(60));
        assert_eq!(cache.lookup("https://example.com/"), None);
    }

    #[test]
    fn test_store_then_lookup() {
        let cache = MetadataCache::new(10, Duration::from_secs(60));
        cache.store("https://example.com/", result("Example"));
        assert_eq!(cache.lookup("https://example.com/"), Some(result("Example")));
    }

    #[test]
    fn test_capacity_never_exceeded() {
        let cache = MetadataCache::new(3, Duration::from_secs(60));
        for i in 0..10 {
            cache.store(&format!("https://example.com/{i}"), result(&i.to_string()));
            assert!(cache.len() <= 3);
        }
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_evicts_oldest_inserted() {
        let cache = MetadataCache::new(2, Duration::from_secs(60));
        cache.store("a", result("a"));
        cache.store("b", result("b"));
        // Reading does not refresh insertion order.
        assert!(cache.lookup("a").is_some());
        cache.store("c", result("c"));

        assert_eq!(cache.lookup("a"), None);
        assert!(cache.lookup("b").is_some());
        assert!(cache.lookup("c").is_some());
    }

    #[test]
    fn test_overwrite_keeps_slot_and_does_not_evict() {
        let cache = MetadataCache::new(2, Duration::from_secs(60));
        cache.store("a", result("a1"));
        cache.store("b", result("b"));
        cache.store("a", result("a2"));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.lookup("a"), Some(result("a2")));

        cache.store("c", result("c"));
        assert_eq!(cache.lookup("a"), None);
        assert!(cache.lookup("b").is_some());
    }

    #[test]
    fn test_stale_entry_not_returned_but_resident() {
        let cache = MetadataCache::new(5, Duration::from_millis(20));
        cache.store("a", result("a"));
        std::thread::sleep(Duration::from_millis(40));

        assert_eq!(cache.lookup("a"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_overwrite_resets_timestamp() {
        let cache = MetadataCache::new(5, Duration::from_millis(50));
        cache.store("a", result("old"));
        std::thread::sleep(Duration::from_millis(70));
        cache.store("a", result("new"));
        assert_eq!(cache.lookup("a"), Some(result("new")));
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let cache = MetadataCache::new(0, Duration::from_secs(60));
        cache.store("a", result("a"));
        assert!(cache.is_empty());
    }
}
