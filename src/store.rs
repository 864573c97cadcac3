//! In-Memory Key-Value Store
//!
//! Single-mutex hashmap with per-entry TTL metadata.

use hashbrown::HashMap;
use parking_lot::Mutex;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use crate::entry::Entry;

/// Thread-safe in-memory key-value store with lazy TTL expiration
///
/// One coarse mutex guards the whole map: every operation is a single
/// critical section of O(1) map work and timestamp comparisons, so
/// unrelated keys serialize against each other in exchange for
/// simplicity. Expired entries are removed only when a read touches
/// them; `keys` and `len` report raw map contents, lapsed entries
/// included, until such a read happens.
///
/// There is no global store. Each `Store` is an independently owned
/// handle, and cloning one yields another handle to the same map.
#[derive(Debug)]
pub struct Store<K, V> {
    inner: Arc<Mutex<HashMap<K, Entry<V>>>>,
}

impl<K, V> Clone for Store<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Default for Store<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Store<K, V>
where
    K: Eq + Hash,
{
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Insert or replace the entry for `key`.
    ///
    /// A `ttl` greater than zero sets an absolute deadline of now + `ttl`;
    /// a zero `ttl` stores the entry without a deadline. Any prior entry
    /// for the key is replaced wholesale, its deadline included.
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        let entry = Entry::new(value, ttl);
        let mut map = self.inner.lock();
        map.insert(key, entry);
    }

    /// Get value by key, returns `None` if the key is absent or expired.
    ///
    /// An entry found past its deadline is removed inside the same
    /// critical section, so the miss also reclaims the slot.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let mut map = self.inner.lock();
        match map.get(key) {
            Some(entry) if entry.is_expired() => {
                map.remove(key);
                None
            }
            Some(entry) => Some(entry.value().clone()),
            None => None,
        }
    }

    /// Delete key, returns true if a map entry existed (expired or not).
    /// Absent keys are a no-op.
    pub fn delete(&self, key: &K) -> bool {
        self.inner.lock().remove(key).is_some()
    }

    /// Check if key exists and is not expired.
    ///
    /// Prunes a lapsed entry the same way `get` does.
    pub fn contains_key(&self, key: &K) -> bool {
        let mut map = self.inner.lock();
        match map.get(key) {
            Some(entry) if entry.is_expired() => {
                map.remove(key);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Snapshot of all keys currently in the map, including expired
    /// entries no read has pruned yet. Callers wanting liveness must
    /// `get` each key.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.inner.lock().keys().cloned().collect()
    }

    /// Number of map entries (including expired)
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all expired entries, returns count of removed keys.
    ///
    /// The store never calls this on its own; it is the hook for an
    /// explicit sweep or a spawned [`TtlCleaner`](crate::TtlCleaner).
    pub fn cleanup_expired(&self) -> usize {
        let mut map = self.inner.lock();
        let before = map.len();
        map.retain(|_, entry| !entry.is_expired());
        before - map.len()
    }

    /// Insert an already-lapsed entry (for testing purposes)
    #[cfg(test)]
    fn set_expired(&self, key: K, value: V) {
        self.inner.lock().insert(key, Entry::expired(value));
    }
}
