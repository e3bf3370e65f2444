//! Expiry Sweeper Task
//!
//! Background task that periodically discards due expiry records.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ShardedStore;

/// Spawns the background sweeper for the store's expiry queue.
///
/// The task wakes every `sweep_interval_secs` seconds and drains the due
/// prefix of the expiry queue, logging each removed record. Sweeping is
/// bookkeeping only: the cache entries themselves stay in place and remain
/// retrievable until overwritten.
///
/// The task exits cooperatively when the shutdown channel is signalled,
/// checked once per wake cycle.
pub fn spawn_sweeper_task(
    store: Arc<ShardedStore>,
    sweep_interval_secs: u64,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expiry sweeper with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = shutdown.changed() => {
                    info!("Expiry sweeper shutting down");
                    return;
                }
            }

            let now = Utc::now();
            let removed = store.sweep_expired(now).await;

            for record in &removed {
                info!(
                    "Removing stale expiry record for {} at {}",
                    record.key.compose(),
                    now
                );
            }
            if removed.is_empty() {
                debug!("Expiry sweep: nothing due");
            }
        }
    })
}
