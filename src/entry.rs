//! Cache Entry
//!
//! Stored value plus its optional expiration deadline.

use std::time::{Duration, Instant};

/// Entry in a store with value and expiration
#[derive(Debug, Clone)]
pub(crate) struct Entry<V> {
    value: V,
    expires_at: Option<Instant>,
}

impl<V> Entry<V> {
    /// Create an entry. A zero `ttl` stores the value without a deadline.
    pub(crate) fn new(value: V, ttl: Duration) -> Self {
        let expires_at = if ttl > Duration::ZERO {
            Some(Instant::now() + ttl)
        } else {
            None
        };
        Self { value, expires_at }
    }

    /// An entry with no deadline never expires; the deadline instant
    /// itself already counts as expired.
    pub(crate) fn is_expired(&self) -> bool {
        self.expires_at
            .map(|t| Instant::now() >= t)
            .unwrap_or(false)
    }

    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    /// Entry whose deadline already lapsed, so tests need no sleeps.
    #[cfg(test)]
    pub(crate) fn expired(value: V) -> Self {
        Self {
            value,
            expires_at: Some(Instant::now() - Duration::from_secs(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_zero_ttl_never_expires() {
        let entry = Entry::new(7, Duration::ZERO);

        assert_eq!(*entry.value(), 7);
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_future_deadline_not_expired() {
        let entry = Entry::new("payload", Duration::from_secs(60));

        assert!(!entry.is_expired());
    }

    #[test]
    fn test_lapsed_deadline_is_expired() {
        let entry = Entry::new("payload", Duration::from_nanos(1));

        thread::sleep(Duration::from_millis(1));
        assert!(entry.is_expired());
    }

    #[test]
    fn test_expired_helper() {
        let entry = Entry::expired(1);

        assert!(entry.is_expired());
    }
}
