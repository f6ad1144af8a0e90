//! Client Module
//!
//! Outbound Steam API access: the shared client core, its rate limiter, and
//! request parameter helpers.

mod params;
mod rate_limit;
mod steam;

pub use params::{params_from, query_pairs, Params};
pub use rate_limit::{RateLimiter, RateLimiterPool};
pub use steam::{normalize_response, CachePolicy, SteamClient, MAX_PLAYER_SUMMARY_IDS};

/// Pool scope under which every Steam Web API client shares one limiter.
pub const STEAM_RATE_LIMIT_SCOPE: &str = "steam";
