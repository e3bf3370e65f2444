//! Cache Entry Module
//!
//! Defines the structure stored per key inside a shard's map.

use chrono::{DateTime, Utc};

use crate::cache::SubscriberHandle;

// == Cache Entry ==
/// A single cache entry: the current value, its optional expiry and the
/// live subscribers attached to it.
///
/// Created on first write, or on first subscribe to a not-yet-written key
/// (empty value, no expiry). Mutated only under the owning shard's lock.
/// A write replaces value and expiry but always preserves the subscriber
/// list. Entries are never removed; the expiry sweeper only discards
/// bookkeeping records, not entries.
#[derive(Debug, Clone, Default)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Absolute expiry time, None = no expiration
    pub expires_at: Option<DateTime<Utc>>,
    /// Handles of the subscriptions currently attached to this entry
    pub subscribers: Vec<SubscriberHandle>,
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_entry_default_is_empty() {
        let entry = CacheEntry::default();
        assert_eq!(entry.value, "");
        assert!(entry.expires_at.is_none());
        assert!(entry.subscribers.is_empty());
    }

    #[test]
    fn test_overwrite_keeps_subscribers() {
        let mut entry = CacheEntry::default();
        entry.subscribers.push(SubscriberHandle::new());

        let at = Utc::now() + Duration::seconds(30);
        entry.value = "v".to_string();
        entry.expires_at = Some(at);

        assert_eq!(entry.expires_at, Some(at));
        assert_eq!(entry.subscribers.len(), 1);
    }
}
