//! TTL Cleaner
//!
//! Opt-in background task that periodically removes expired entries.
//! Neither store sweeps on its own; without a cleaner, lapsed entries
//! linger until a read prunes them.

use std::hash::Hash;
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

use crate::sharded::ShardedStore;
use crate::store::Store;

/// Storage that can drop its expired entries in one pass
pub trait Cleanup {
    /// Remove all expired entries, returning how many were dropped
    fn cleanup_expired(&self) -> usize;
}

impl<K, V> Cleanup for Store<K, V>
where
    K: Eq + Hash,
{
    fn cleanup_expired(&self) -> usize {
        Store::cleanup_expired(self)
    }
}

impl<K, V> Cleanup for ShardedStore<K, V>
where
    K: Eq + Hash,
{
    fn cleanup_expired(&self) -> usize {
        ShardedStore::cleanup_expired(self)
    }
}

/// Background TTL cleanup task
///
/// Holds a store handle and sweeps it on a fixed interval. The task runs
/// until the handle returned by [`spawn`](Self::spawn) is aborted or the
/// runtime shuts down; constructing a store never starts one.
pub struct TtlCleaner<S> {
    store: S,
    interval: Duration,
}

impl<S> TtlCleaner<S>
where
    S: Cleanup + Send + 'static,
{
    /// Create a new TTL cleaner
    pub fn new(store: S, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Run the cleaner (should be spawned as a task)
    pub async fn run(self) {
        let mut ticker = interval(self.interval);
        info!("TTL cleaner started, interval: {:?}", self.interval);

        loop {
            ticker.tick().await;
            let removed = self.store.cleanup_expired();
            if removed > 0 {
                debug!(removed, "Cleaned up expired entries");
            }
        }
    }

    /// Spawn the cleaner as a background task
    pub fn spawn(store: S, interval: Duration) -> tokio::task::JoinHandle<()> {
        let cleaner = Self::new(store, interval);
        tokio::spawn(cleaner.run())
    }
}
