//! Expiry Queue Module
//!
//! Globally shared, expiry-ordered bookkeeping records consumed by the
//! background sweeper.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::cache::ItemId;

// == Expiry Record ==
/// A pending (key, timestamp) pair tracked separately from the stored value.
///
/// Multiple records may exist for the same key; stale ones age out as
/// no-ops when swept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryRecord {
    /// The key the record was registered for
    pub key: ItemId,
    /// When the record becomes due
    pub expires_at: DateTime<Utc>,
}

// == Expiry Queue ==
/// Expiry records sorted ascending by timestamp, under a single lock
/// independent of the shard locks.
///
/// The queue holds bookkeeping only: sweeping a record does not remove the
/// corresponding entry from the store, so a value stays retrievable past
/// its nominal expiry unless overwritten.
#[derive(Debug, Default)]
pub struct ExpiryQueue {
    records: Mutex<VecDeque<ExpiryRecord>>,
}

impl ExpiryQueue {
    // == Constructor ==
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Splices a new record in before the first record with a strictly
    /// greater expiry. Records with equal expiries keep arrival order: the
    /// new one goes after the existing ones.
    pub async fn insert(&self, key: ItemId, expires_at: DateTime<Utc>) {
        let mut records = self.records.lock().await;
        let position = records
            .iter()
            .position(|rec| rec.expires_at > expires_at)
            .unwrap_or(records.len());
        records.insert(position, ExpiryRecord { key, expires_at });
    }

    // == Sweep ==
    /// Unlinks and returns every record due at or before `now`, stopping at
    /// the first record still in the future. The queue being sorted makes
    /// this a prefix scan.
    pub async fn sweep_due(&self, now: DateTime<Utc>) -> Vec<ExpiryRecord> {
        let mut records = self.records.lock().await;
        let mut due = Vec::new();
        while records.front().is_some_and(|head| head.expires_at <= now) {
            if let Some(rec) = records.pop_front() {
                due.push(rec);
            }
        }
        due
    }

    /// Number of pending records.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// True when no records are pending.
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}
