//! Sharded Store Module
//!
//! Fixed-size array of independently locked maps, plus the shared expiry
//! queue and per-entry subscriber fan-out.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::cache::{CacheEntry, ExpiryQueue, ExpiryRecord, ItemId, SubscriberHandle, SHARD_COUNT};
use crate::error::{CacheError, Result};

type Shard = Mutex<HashMap<String, CacheEntry>>;

// == Sharded Store ==
/// Process-wide cache state: `SHARD_COUNT` independently locked maps keyed
/// by the composed item key, and the shared expiry queue.
///
/// Each shard's lock is the sole mutation gate for its map. A lock is only
/// held for map access, never across notification fan-out or I/O, so
/// operations on keys in different shards proceed fully concurrently.
#[derive(Debug)]
pub struct ShardedStore {
    shards: Vec<Shard>,
    expiry: ExpiryQueue,
}

impl Default for ShardedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ShardedStore {
    // == Constructor ==
    /// Creates an empty store with `SHARD_COUNT` shards.
    pub fn new() -> Self {
        Self {
            shards: (0..SHARD_COUNT).map(|_| Mutex::new(HashMap::new())).collect(),
            expiry: ExpiryQueue::new(),
        }
    }

    // == Put ==
    /// Upserts the entry for `id`, preserving any existing subscribers.
    ///
    /// If an expiry was supplied, an expiry record is registered after the
    /// shard lock is released. Every subscriber present at write time is
    /// then signalled once, outside any lock. Delivery itself carries no
    /// guarantee; an entry read immediately after `put` returns is
    /// consistent.
    pub async fn put(&self, id: &ItemId, value: String, expires_at: Option<DateTime<Utc>>) {
        let subscribers = {
            let mut shard = self.shards[id.shard()].lock().await;
            let entry = shard.entry(id.compose()).or_default();
            entry.value = value;
            entry.expires_at = expires_at;
            entry.subscribers.clone()
        };

        if let Some(at) = expires_at {
            self.expiry.insert(id.clone(), at).await;
        }

        for subscriber in &subscribers {
            subscriber.signal();
        }
    }

    // == Get ==
    /// Retrieves the current value and expiry for `id`.
    ///
    /// Nominal expiry is not checked here: an entry whose expiry record has
    /// already been swept stays retrievable until overwritten.
    pub async fn get(&self, id: &ItemId) -> Result<(String, Option<DateTime<Utc>>)> {
        let shard = self.shards[id.shard()].lock().await;
        match shard.get(&id.compose()) {
            Some(entry) => Ok((entry.value.clone(), entry.expires_at)),
            None => Err(CacheError::NotFound(id.compose())),
        }
    }

    // == Subscribe ==
    /// Registers a fresh subscriber handle on the entry for `id`, creating
    /// the entry (empty value, no expiry) if it does not exist yet.
    ///
    /// The returned handle is owned by the caller's serving task; the entry
    /// only keeps a clone for fan-out.
    pub async fn subscribe(&self, id: &ItemId) -> SubscriberHandle {
        let handle = SubscriberHandle::new();
        let mut shard = self.shards[id.shard()].lock().await;
        shard
            .entry(id.compose())
            .or_default()
            .subscribers
            .push(handle.clone());
        handle
    }

    // == Unsubscribe ==
    /// Removes `handle` from the entry's subscriber list. A no-op if the
    /// entry or the handle is already gone; wake-ups already dispatched to
    /// the handle are not retracted.
    pub async fn unsubscribe(&self, id: &ItemId, handle: &SubscriberHandle) {
        let mut shard = self.shards[id.shard()].lock().await;
        if let Some(entry) = shard.get_mut(&id.compose()) {
            entry.subscribers.retain(|sub| sub.id() != handle.id());
        }
    }

    // == Read Current ==
    /// Lock-protected read of the entry's current state, used by
    /// subscription loops after a wake-up. Because this is a fresh read,
    /// a subscriber may observe a later value than the write that woke it.
    pub async fn read_current(&self, id: &ItemId) -> (String, Option<DateTime<Utc>>) {
        let shard = self.shards[id.shard()].lock().await;
        shard
            .get(&id.compose())
            .map(|entry| (entry.value.clone(), entry.expires_at))
            .unwrap_or_default()
    }

    // == Sweep ==
    /// Drains due expiry records. Bookkeeping only: the corresponding
    /// entries are left in place, subscribers included.
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> Vec<ExpiryRecord> {
        self.expiry.sweep_due(now).await
    }

    /// Number of expiry records still pending.
    pub async fn pending_expiries(&self) -> usize {
        self.expiry.len().await
    }

    /// Number of subscribers currently attached to the entry for `id`.
    pub async fn subscriber_count(&self, id: &ItemId) -> usize {
        let shard = self.shards[id.shard()].lock().await;
        shard
            .get(&id.compose())
            .map(|entry| entry.subscribers.len())
            .unwrap_or(0)
    }
}
