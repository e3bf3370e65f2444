//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint, including the
//! serving loop behind long-lived subscription streams.

use std::convert::Infallible;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use chrono::{DateTime, Duration, Utc};
use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, warn};

use crate::cache::{parse_assignment, ItemId, ShardedStore};
use crate::error::{CacheError, Result};
use crate::models::{
    AssignRequest, ClientIdResponse, GetResponse, HealthResponse, SetRequest, SetResponse,
    UpdateEvent,
};

/// Application state shared across all handlers.
///
/// The store is process-wide, long-lived state; the shutdown sender is the
/// broadcast point every background loop subscribes to.
#[derive(Clone)]
pub struct AppState {
    /// Sharded cache store plus expiry queue
    pub store: Arc<ShardedStore>,
    /// Counter backing client id assignment
    pub next_client_id: Arc<AtomicU64>,
    /// Process-wide cooperative shutdown signal
    pub shutdown: Arc<watch::Sender<bool>>,
}

impl AppState {
    /// Creates a fresh AppState with an empty store.
    pub fn new() -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            store: Arc::new(ShardedStore::new()),
            next_client_id: Arc::new(AtomicU64::new(0)),
            shutdown: Arc::new(shutdown),
        }
    }

    /// Broadcasts the shutdown signal to the sweeper and all open
    /// subscription loops.
    pub fn signal_shutdown(&self) {
        // Send only fails when every receiver is gone, which is fine here.
        let _ = self.shutdown.send(true);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Handler for POST /client-id
///
/// Assigns a monotonically increasing, process-lifetime-unique client id.
/// Informational only; nothing enforces its use as an owner name.
pub async fn client_id_handler(State(state): State<AppState>) -> Json<ClientIdResponse> {
    let id = state.next_client_id.fetch_add(1, Ordering::SeqCst) + 1;
    Json(ClientIdResponse::new(id))
}

/// Converts a TTL in seconds into an absolute expiry timestamp.
///
/// Returns None when the TTL cannot be represented as a timestamp, so
/// callers can reject it instead of wrapping or overflowing.
fn expiry_from_ttl(secs: u64) -> Option<DateTime<Utc>> {
    let delta = i64::try_from(secs).ok().and_then(Duration::try_seconds)?;
    Utc::now().checked_add_signed(delta)
}

/// Handler for PUT /items
///
/// Stores a value under the composite key, with an optional TTL. All
/// subscribers attached to the entry are notified of the update.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidKey(error_msg));
    }

    let id = ItemId::new(req.owner, req.service, req.name);
    let expires_at = match req.ttl {
        Some(secs) => Some(expiry_from_ttl(secs).ok_or_else(|| {
            CacheError::InvalidKey(format!("TTL {} seconds is out of range", secs))
        })?),
        None => None,
    };
    state.store.put(&id, req.value, expires_at).await;

    Ok(Json(SetResponse::new(id.compose())))
}

/// Handler for POST /assign
///
/// Accepts the textual `owner:service:name=value[,ttlSeconds]` form and
/// behaves exactly like PUT /items once parsed.
pub async fn assign_handler(
    State(state): State<AppState>,
    Json(req): Json<AssignRequest>,
) -> Result<Json<SetResponse>> {
    let assignment = parse_assignment(&req.assignment)?;
    let expires_at = match assignment.ttl {
        Some(secs) => Some(
            expiry_from_ttl(secs)
                .ok_or_else(|| CacheError::InvalidAssignment(req.assignment.clone()))?,
        ),
        None => None,
    };
    state
        .store
        .put(&assignment.id, assignment.value, expires_at)
        .await;

    Ok(Json(SetResponse::new(assignment.id.compose())))
}

/// Handler for GET /items/:key
///
/// Retrieves a value by its composed `owner:service:name` key.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let id: ItemId = key.parse()?;
    let (value, expires_at) = state.store.get(&id).await?;

    Ok(Json(GetResponse::new(id.compose(), value, expires_at)))
}

/// Handler for GET /subscribe/:key
///
/// Opens a long-lived SSE stream pushing the entry's state after each
/// update. The serving loop waits for the subscriber's wake-up signal or
/// the shutdown broadcast; on wake it re-reads the entry under the shard
/// lock, so rapid writes may coalesce into a single push carrying the
/// latest value. A failed push means the client is gone: the handle is
/// unregistered and the loop ends.
pub async fn subscribe_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Sse<ReceiverStream<std::result::Result<Event, Infallible>>>> {
    let id: ItemId = key.parse()?;
    let handle = state.store.subscribe(&id).await;
    debug!("Subscription opened for {}", id.compose());

    let (tx, rx) = mpsc::channel::<std::result::Result<Event, Infallible>>(1);
    let store = state.store.clone();
    let mut shutdown = state.shutdown.subscribe();

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = handle.signalled() => {}
                _ = shutdown.changed() => {
                    store.unsubscribe(&id, &handle).await;
                    debug!("Subscription for {} closed on shutdown", id.compose());
                    return;
                }
            }

            let (value, expires_at) = store.read_current(&id).await;
            let update = UpdateEvent {
                key: id.compose(),
                value,
                expires_at,
            };
            let event = match Event::default().event("update").json_data(&update) {
                Ok(event) => event,
                Err(error) => {
                    warn!("Failed to encode update for {}: {}", id.compose(), error);
                    continue;
                }
            };

            if tx.send(Ok(event)).await.is_err() {
                store.unsubscribe(&id, &handle).await;
                debug!("Subscriber for {} disconnected", id.compose());
                return;
            }
        }
    });

    Ok(Sse::new(ReceiverStream::new(rx)).keep_alive(KeepAlive::default()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
