//! Shardcache - a sharded in-memory cache server
//!
//! Stores named values under `owner:service:name` keys across 128
//! independently locked shards, tracks optional expiries in a sorted
//! bookkeeping queue, and pushes updates to subscribers over SSE.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_sweeper_task;
