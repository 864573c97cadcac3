//! Sharded In-Memory Key-Value Store
//!
//! DashMap-backed variant with per-shard locks instead of one global mutex.

use dashmap::DashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use crate::entry::Entry;

/// Sharded thread-safe key-value store with lazy TTL expiration
///
/// Same observable per-key semantics as [`Store`](crate::Store), with the
/// map spread across shards so that operations on different keys can run
/// in parallel. Each shard has its own lock; reads and writes only block
/// access to the shard holding the key.
///
/// Like the coarse-locked store, expiration stays lazy: `keys` and `len`
/// count lapsed entries until a read prunes them.
pub struct ShardedStore<K, V> {
    inner: Arc<DashMap<K, Entry<V>>>,
}

impl<K, V> fmt::Debug for ShardedStore<K, V>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardedStore")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<K, V> Clone for ShardedStore<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Default for ShardedStore<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ShardedStore<K, V>
where
    K: Eq + Hash,
{
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
        }
    }

    /// Create with a specific shard count, which must be a power of two
    pub fn with_shard_amount(shard_amount: usize) -> Self {
        Self {
            inner: Arc::new(DashMap::with_shard_amount(shard_amount)),
        }
    }

    /// Insert or replace the entry for `key`.
    ///
    /// A zero `ttl` stores the entry without a deadline; any prior entry
    /// for the key is replaced wholesale, its deadline included.
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        self.inner.insert(key, Entry::new(value, ttl));
    }

    /// Get value by key, returns `None` if the key is absent or expired.
    ///
    /// A lapsed entry is pruned as part of the call.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let entry = self.inner.get(key)?;
        if entry.value().is_expired() {
            // Drop the read reference before removing
            drop(entry);
            // remove_if re-checks the deadline under the shard lock so a
            // concurrent set between check and removal is not clobbered
            self.inner.remove_if(key, |_, e| e.is_expired());
            return None;
        }
        Some(entry.value().value().clone())
    }

    /// Delete key, returns true if a map entry existed (expired or not).
    /// Absent keys are a no-op.
    pub fn delete(&self, key: &K) -> bool {
        self.inner.remove(key).is_some()
    }

    /// Check if key exists and is not expired.
    ///
    /// Prunes a lapsed entry the same way `get` does.
    pub fn contains_key(&self, key: &K) -> bool {
        match self.inner.get(key) {
            Some(entry) => {
                if entry.value().is_expired() {
                    // Drop the read reference before removing
                    drop(entry);
                    self.inner.remove_if(key, |_, e| e.is_expired());
                    false
                } else {
                    true
                }
            }
            None => false,
        }
    }

    /// Snapshot of all keys currently in the map, including expired
    /// entries no read has pruned yet
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.inner.iter().map(|r| r.key().clone()).collect()
    }

    /// Number of map entries (including expired)
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Remove all expired entries, returns count of removed keys.
    ///
    /// Never called by the store itself; the hook for an explicit sweep
    /// or a spawned [`TtlCleaner`](crate::TtlCleaner).
    pub fn cleanup_expired(&self) -> usize {
        let mut removed = 0;
        self.inner.retain(|_, entry| {
            if entry.is_expired() {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    /// Insert an already-lapsed entry (for testing purposes)
    #[cfg(test)]
    fn set_expired(&self, key: K, value: V) {
        self.inner.insert(key, Entry::expired(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_basic_operations() {
        let store = ShardedStore::new();

        store.set("key", 123, Duration::ZERO);
        assert_eq!(store.get(&"key"), Some(123));

        assert!(store.contains_key(&"key"));

        assert!(store.delete(&"key"));
        assert!(!store.contains_key(&"key"));
        assert_eq!(store.get(&"key"), None);
    }

    #[test]
    fn test_overwrite() {
        let store = ShardedStore::new();
        store.set("key", 123, Duration::from_millis(10));
        store.set("key", 456, Duration::ZERO);

        thread::sleep(Duration::from_millis(30));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&"key"), Some(456));
    }

    #[test]
    fn test_ttl_expiration() {
        let store = ShardedStore::new();
        store.set("expiring", "temporary", Duration::from_millis(20));
        assert_eq!(store.get(&"expiring"), Some("temporary"));

        thread::sleep(Duration::from_millis(50));
        assert_eq!(store.get(&"expiring"), None);
    }

    #[test]
    fn test_expired_entry_pruned_on_get() {
        let store = ShardedStore::new();
        store.set_expired("lapsed", 1);
        store.set("live", 2, Duration::ZERO);

        assert_eq!(store.len(), 2);

        assert_eq!(store.get(&"lapsed"), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_keys_include_unpruned_expired() {
        let store = ShardedStore::new();
        store.set_expired("lapsed", 1);
        store.set("live", 2, Duration::ZERO);

        let mut keys = store.keys();
        keys.sort_unstable();
        assert_eq!(keys, vec!["lapsed", "live"]);
    }

    #[test]
    fn test_cleanup() {
        let store = ShardedStore::new();
        for i in 0..10 {
            store.set_expired(i, i);
        }
        store.set(10, 10, Duration::ZERO);

        let removed = store.cleanup_expired();
        assert_eq!(removed, 10);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_with_shard_amount() {
        let store = ShardedStore::with_shard_amount(16);
        store.set("key", 1, Duration::ZERO);
        assert_eq!(store.get(&"key"), Some(1));
    }

    #[test]
    fn test_concurrent_access() {
        let store = ShardedStore::new();

        // Spawn multiple threads writing concurrently
        let handles: Vec<_> = (0..10)
            .map(|i| {
                let s = store.clone();
                thread::spawn(move || {
                    for j in 0..100 {
                        let key = format!("key-{}-{}", i, j);
                        s.set(key.clone(), j, Duration::ZERO);
                        assert_eq!(s.get(&key), Some(j));
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(store.len(), 1000);
    }
}
