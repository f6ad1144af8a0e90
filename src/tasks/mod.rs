//! Background Tasks Module
//!
//! Periodic work that runs alongside the gateway.
//!
//! # Tasks
//! - TTL Cleanup: Sweeps expired responses out of the cache

mod cleanup;

pub use cleanup::spawn_cleanup_task;
