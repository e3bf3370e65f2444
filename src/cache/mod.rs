//! Cache Module
//!
//! Sharded in-memory storage with TTL bookkeeping and per-entry update
//! subscriptions.

mod entry;
mod expiry;
mod key;
mod store;
mod subscriber;


// Re-export public types
pub use entry::CacheEntry;
pub use expiry::{ExpiryQueue, ExpiryRecord};
pub use key::{parse_assignment, Assignment, ItemId};
pub use store::ShardedStore;
pub use subscriber::SubscriberHandle;

// == Public Constants ==
/// Number of independently locked shards the key space is split into
pub const SHARD_COUNT: usize = 128;
