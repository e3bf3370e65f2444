//! Subscriber Handle Module
//!
//! Per-subscription wake primitive used for update fan-out.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

static NEXT_SUBSCRIBER_ID: AtomicU64 = AtomicU64::new(1);

// == Subscriber Handle ==
/// A single-slot wake primitive representing one active subscription.
///
/// The handle is owned by the serving task for that subscription; the
/// store's per-entry subscriber lists only hold clones of it. `signal`
/// stores at most one pending wake-up, so rapid writes coalesce: the
/// serving task re-reads the entry on wake and observes the latest value,
/// not every intermediate one.
#[derive(Debug, Clone)]
pub struct SubscriberHandle {
    id: u64,
    notify: Arc<Notify>,
}

impl SubscriberHandle {
    // == Constructor ==
    /// Creates a fresh handle with a process-unique id.
    pub fn new() -> Self {
        Self {
            id: NEXT_SUBSCRIBER_ID.fetch_add(1, Ordering::Relaxed),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Process-unique id, used to remove the handle from a subscriber list.
    pub fn id(&self) -> u64 {
        self.id
    }

    // == Signal ==
    /// Raises the wake-up signal. If no task is waiting, a single permit is
    /// stored; further signals before the next wait are coalesced into it.
    pub fn signal(&self) {
        self.notify.notify_one();
    }

    // == Wait ==
    /// Waits until the signal is raised (or consumes a stored permit).
    pub async fn signalled(&self) {
        self.notify.notified().await;
    }
}

impl Default for SubscriberHandle {
    fn default() -> Self {
        Self::new()
    }
}
