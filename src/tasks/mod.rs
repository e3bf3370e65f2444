//! Background Tasks Module
//!
//! Contains background tasks that run alongside request handling.
//!
//! # Tasks
//! - Expiry sweeper: discards due expiry records at a fixed interval

mod sweeper;

pub use sweeper::spawn_sweeper_task;
