use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

struct CacheEntry<T> {
    value: T,
    stored_at: Instant,
}

struct Inner<T> {
    entries: HashMap<String, CacheEntry<T>>,
    // Insertion order of the keys currently resident, one slot per key.
    order: VecDeque<String>,
}

/// In-memory TTL cache with a FIFO capacity cap.
///
/// Entries expire lazily: a stale entry is ignored by `get` but stays
/// resident until it is overwritten by a refetch or evicted by the cap.
/// Writes to the same key are last-write-wins.
///
/// A zero TTL disables the cache entirely: `get` always misses and
/// `insert` is a no-op.
pub struct TtlCache<T> {
    ttl: Duration,
    capacity: usize,
    inner: Mutex<Inner<T>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        TtlCache {
            ttl,
            capacity,
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    pub fn enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub fn get(&self, key: &str) -> Option<T> {
        if !self.enabled() {
            return None;
        }

        let inner = self.inner.lock().unwrap();
        let entry = inner.entries.get(key)?;

        if entry.stored_at.elapsed() < self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    pub fn insert(&self, key: &str, value: T) {
        if !self.enabled() {
            return;
        }

        let mut inner = self.inner.lock().unwrap();

        let entry = CacheEntry {
            value,
            stored_at: Instant::now(),
        };
        if inner.entries.insert(key.to_string(), entry).is_none() {
            inner.order.push_back(key.to_string());
        }

        while inner.entries.len() > self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn returns_fresh_entries() {
        let cache = TtlCache::new(Duration::from_secs(60), 16);
        cache.insert("m1", 42);
        assert_eq!(cache.get("m1"), Some(42));
        assert_eq!(cache.get("m2"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn expires_entries_lazily() {
        let cache = TtlCache::new(Duration::from_secs(60), 16);
        cache.insert("m1", 42);

        tokio::time::advance(Duration::from_secs(61)).await;

        // Logically absent but still resident.
        assert_eq!(cache.get("m1"), None);
        assert_eq!(cache.len(), 1);

        // A refetch overwrites in place and makes the key valid again.
        cache.insert("m1", 43);
        assert_eq!(cache.get("m1"), Some(43));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn evicts_oldest_beyond_capacity() {
        let cache = TtlCache::new(Duration::from_secs(60), 2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("c", 3);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(2));
        assert_eq!(cache.get("c"), Some(3));
    }

    #[tokio::test(start_paused = true)]
    async fn overwriting_a_key_does_not_consume_capacity() {
        let cache = TtlCache::new(Duration::from_secs(60), 2);
        cache.insert("a", 1);
        cache.insert("a", 2);
        cache.insert("b", 3);

        assert_eq!(cache.get("a"), Some(2));
        assert_eq!(cache.get("b"), Some(3));
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_ttl_disables_the_cache() {
        let cache = TtlCache::new(Duration::ZERO, 16);
        cache.insert("m1", 42);
        assert_eq!(cache.get("m1"), None);
        assert!(cache.is_empty());
    }
}
