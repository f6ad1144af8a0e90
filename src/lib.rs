//! Steam Gateway - A caching, rate-limited gateway to the Steam Web API
//!
//! Wraps Steam's Web and Store APIs in a shared client with a TTL response
//! cache, a process-wide rate limiter, and retry with backoff, then exposes
//! text-producing tools over a small HTTP API.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod steam_id;
pub mod tasks;
pub mod tools;

pub use api::AppState;
pub use client::{CachePolicy, RateLimiter, RateLimiterPool, SteamClient};
pub use config::Config;
pub use error::{Result, SteamApiError};
pub use tasks::spawn_cleanup_task;
pub use tools::ToolRegistry;
