//! Configuration Module
//!
//! Handles loading gateway configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{Result, SteamApiError};

/// Default Steam Web API base URL (requires an API key).
pub const DEFAULT_API_BASE_URL: &str = "https://api.steampowered.com";

/// Default Steam Store API base URL (no key required).
pub const DEFAULT_STORE_BASE_URL: &str = "https://store.steampowered.com/api";

/// Gateway configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Steam Web API key; the client refuses to start without it
    pub api_key: Option<String>,
    /// SteamID64 of the key owner, enables "my profile" queries
    pub owner_steam_id: Option<String>,
    /// Outbound request rate shared by every client on the same limiter
    pub requests_per_second: f64,
    /// Attempt budget for transient failures
    pub max_retries: u32,
    /// Overall timeout for one outbound request
    pub request_timeout: Duration,
    /// Base unit for exponential backoff
    pub retry_backoff: Duration,
    /// Whether responses are cached at all
    pub cache_enabled: bool,
    /// Soft bound on cached entries
    pub cache_max_entries: usize,
    /// TTL in seconds for entries stored without an explicit TTL
    pub cache_default_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// HTTP bridge port
    pub server_port: u16,
    /// Steam Web API base URL
    pub api_base_url: String,
    /// Steam Store API base URL
    pub store_base_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STEAM_API_KEY` - Steam Web API key (required by the client)
    /// - `STEAM_USER_ID` - SteamID64 of the key owner (optional)
    /// - `STEAM_RATE_LIMIT` - Requests per second (default: 10)
    /// - `STEAM_MAX_RETRIES` - Attempt budget (default: 3)
    /// - `STEAM_TIMEOUT` - Request timeout in seconds (default: 30)
    /// - `STEAM_RETRY_BACKOFF_MS` - Backoff base in milliseconds (default: 1000)
    /// - `STEAM_CACHE_ENABLED` - Enable response caching (default: true)
    /// - `STEAM_CACHE_MAX_SIZE` - Maximum cache entries (default: 1000)
    /// - `STEAM_CACHE_DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `CACHE_CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP bridge port (default: 3000)
    /// - `STEAM_API_BASE_URL` / `STEAM_STORE_BASE_URL` - upstream overrides
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Creates a Config from an arbitrary variable lookup.
    ///
    /// Unset, empty, or unparseable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            api_key: var("STEAM_API_KEY"),
            owner_steam_id: var("STEAM_USER_ID"),
            requests_per_second: var("STEAM_RATE_LIMIT")
                .and_then(|v| v.trim().parse().ok())
                .filter(|rps: &f64| rps.is_finite() && *rps > 0.0)
                .unwrap_or(defaults.requests_per_second),
            max_retries: var("STEAM_MAX_RETRIES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_retries),
            request_timeout: var("STEAM_TIMEOUT")
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|secs| secs.is_finite() && *secs > 0.0)
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                .unwrap_or(defaults.request_timeout),
            retry_backoff: var("STEAM_RETRY_BACKOFF_MS")
                .and_then(|v| v.trim().parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry_backoff),
            cache_enabled: var("STEAM_CACHE_ENABLED")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.cache_enabled),
            cache_max_entries: var("STEAM_CACHE_MAX_SIZE")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.cache_max_entries),
            cache_default_ttl: var("STEAM_CACHE_DEFAULT_TTL")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.cache_default_ttl),
            cleanup_interval: var("CACHE_CLEANUP_INTERVAL")
                .and_then(|v| v.trim().parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .unwrap_or(defaults.cleanup_interval),
            server_port: var("SERVER_PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.server_port),
            api_base_url: var("STEAM_API_BASE_URL").unwrap_or(defaults.api_base_url),
            store_base_url: var("STEAM_STORE_BASE_URL").unwrap_or(defaults.store_base_url),
        }
    }

    /// Returns the API key or a configuration error when it is missing.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                SteamApiError::Config(
                    "STEAM_API_KEY must be provided or set in environment".to_string(),
                )
            })
    }

    /// Sets the API key, consuming and returning the config.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            owner_steam_id: None,
            requests_per_second: 10.0,
            max_retries: 3,
            request_timeout: Duration::from_secs(30),
            retry_backoff: Duration::from_secs(1),
            cache_enabled: true,
            cache_max_entries: 1000,
            cache_default_ttl: 300,
            cleanup_interval: 60,
            server_port: 3000,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            store_base_url: DEFAULT_STORE_BASE_URL.to_string(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
