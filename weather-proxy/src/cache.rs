//! In-process TTL cache for upstream responses.
//!
//! Entries expire after a fixed TTL; the LRU bound keeps memory flat
//! when many distinct locations are queried.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

pub struct ResponseCache {
    entries: LruCache<String, (Instant, String)>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity is at least 1");
        Self {
            entries: LruCache::new(capacity),
            ttl,
        }
    }

    /// Fresh cached value for `key`, if any. Stale entries are dropped
    /// on access.
    pub fn get(&mut self, key: &str) -> Option<String> {
        match self.entries.get(key) {
            Some((stored_at, value)) if stored_at.elapsed() < self.ttl => Some(value.clone()),
            Some(_) => {
                self.entries.pop(key);
                None
            }
            None => None,
        }
    }

    pub fn put(&mut self, key: String, value: String) {
        self.entries.put(key, (Instant::now(), value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entries_hit() {
        let mut cache = ResponseCache::new(4, Duration::from_secs(60));
        cache.put("today:london".to_string(), "{\"temp\": 11}".to_string());
        assert_eq!(cache.get("today:london").as_deref(), Some("{\"temp\": 11}"));
        assert_eq!(cache.get("today:paris"), None);
    }

    #[test]
    fn expired_entries_miss_and_are_evicted() {
        let mut cache = ResponseCache::new(4, Duration::ZERO);
        cache.put("today:london".to_string(), "{}".to_string());
        assert_eq!(cache.get("today:london"), None);
        // gone entirely, not just filtered
        assert_eq!(cache.entries.len(), 0);
    }

    #[test]
    fn capacity_bound_evicts_least_recently_used() {
        let mut cache = ResponseCache::new(2, Duration::from_secs(60));
        cache.put("a".to_string(), "1".to_string());
        cache.put("b".to_string(), "2".to_string());
        cache.put("c".to_string(), "3".to_string());
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("c").as_deref(), Some("3"));
    }
}
