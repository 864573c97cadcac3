//! EPHEMAP - Thread-Safe In-Memory TTL Store
//!
//! Generic key-value storage with per-entry time-to-live and lazy
//! expiration: an entry past its deadline is invisible to reads and is
//! physically removed the next time a read touches it. No background
//! work happens unless a [`TtlCleaner`] is explicitly spawned.
//!
//! Two interchangeable stores cover the locking tradeoff: [`Store`]
//! serializes everything behind one coarse mutex, [`ShardedStore`]
//! spreads entries across per-shard locks.
//!
//! ```
//! use ephemap::Store;
//! use std::time::Duration;
//!
//! let store = Store::new();
//!
//! // Zero TTL stores the entry without a deadline.
//! store.set("config", 7, Duration::ZERO);
//!
//! store.set("session", 42, Duration::from_secs(300));
//! assert_eq!(store.get(&"session"), Some(42));
//! ```

mod entry;
mod sharded;
mod store;
mod ttl;

pub use sharded::ShardedStore;
pub use store::Store;
pub use ttl::{Cleanup, TtlCleaner};
