//! Steam API Client
//!
//! Async client for the Steam Web API and Store API with rate limiting,
//! retry with exponential backoff, response normalization, and cache-aside
//! response caching.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Response};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::cache::{ttl_for, CacheStats, TtlCache};
use crate::client::params::{query_pairs, Params};
use crate::client::rate_limit::RateLimiter;
use crate::config::Config;
use crate::error::{Result, SteamApiError};

/// Maximum Steam IDs accepted by `GetPlayerSummaries` in one call.
pub const MAX_PLAYER_SUMMARY_IDS: usize = 100;

// == Cache Policy ==
/// Whether a cacheable call may be answered from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Serve from cache when possible
    #[default]
    Use,
    /// Always hit the network, then refresh the cached entry
    Bypass,
}

// == Attempt Outcome ==
/// What to do after one attempt in the retry loop.
enum Attempt {
    Done(Value),
    /// Transient failure; the delay to wait before the next attempt
    Retry { reason: String, backoff: Duration },
}

// == Steam Client ==
/// Shared client core for every Steam call the gateway makes.
pub struct SteamClient {
    api_key: String,
    owner_steam_id: Option<String>,
    api_base_url: String,
    store_base_url: String,
    max_retries: u32,
    retry_backoff: Duration,
    rate_limiter: Arc<RateLimiter>,
    cache: Option<Arc<TtlCache>>,
    http: reqwest::Client,
}

impl fmt::Debug for SteamClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SteamClient")
            .field("api_key", &"<redacted>")
            .field("owner_steam_id", &self.owner_steam_id)
            .field("api_base_url", &self.api_base_url)
            .field("store_base_url", &self.store_base_url)
            .field("max_retries", &self.max_retries)
            .field("rate_limiter", &self.rate_limiter)
            .field("cache_enabled", &self.cache.is_some())
            .finish()
    }
}

impl SteamClient {
    // == Constructors ==
    /// Creates a client throttled by `rate_limiter`.
    ///
    /// Pass the same limiter to several clients to make them share one rate.
    /// Fails when the configuration has no API key.
    pub fn new(config: &Config, rate_limiter: Arc<RateLimiter>) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SteamApiError::Config(format!("failed to build HTTP client: {}", e)))?;

        let cache = config.cache_enabled.then(|| {
            Arc::new(TtlCache::new(
                config.cache_max_entries,
                Duration::from_secs(config.cache_default_ttl),
            ))
        });

        info!(
            rate = rate_limiter.requests_per_second(),
            max_retries = config.max_retries,
            cache_enabled = cache.is_some(),
            "Steam client initialized"
        );

        Ok(Self {
            api_key,
            owner_steam_id: config.owner_steam_id.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            store_base_url: config.store_base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries.max(1),
            retry_backoff: config.retry_backoff,
            rate_limiter,
            cache,
            http,
        })
    }

    /// Creates a client with its own limiter at `config.requests_per_second`.
    pub fn with_dedicated_limiter(config: &Config) -> Result<Self> {
        let limiter = Arc::new(RateLimiter::new(config.requests_per_second)?);
        Self::new(config, limiter)
    }

    // == Accessors ==
    /// The limiter this client throttles through.
    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        &self.rate_limiter
    }

    /// The response cache, when caching is enabled.
    pub fn cache(&self) -> Option<&Arc<TtlCache>> {
        self.cache.as_ref()
    }

    /// SteamID64 of the API key owner, if configured.
    pub fn owner_steam_id(&self) -> Option<&str> {
        self.owner_steam_id.as_deref()
    }

    // == Cache Administration ==
    /// Clears the response cache, returning how many entries were removed.
    pub async fn clear_cache(&self) -> usize {
        match &self.cache {
            Some(cache) => cache.clear().await,
            None => 0,
        }
    }

    /// Cache statistics, or None when caching is disabled.
    pub async fn cache_stats(&self) -> Option<CacheStats> {
        match &self.cache {
            Some(cache) => Some(cache.stats().await),
            None => None,
        }
    }

    /// Consumes the client at shutdown.
    ///
    /// Dropping the client is what releases the connection pool; this only
    /// marks the end of its lifecycle in the logs.
    pub fn close(self) {
        info!("Steam client closed");
    }

    // == Web API ==
    /// GET `{interface}/{method}/v{version}/` on the Web API.
    pub async fn get(
        &self,
        interface: &str,
        method: &str,
        version: u32,
        params: &Params,
        policy: CachePolicy,
    ) -> Result<Value> {
        let url = self.build_url(interface, method, version);
        let endpoint = format!("{}/{}/v{}", interface, method, version);

        self.cache_aside(&endpoint, params, ttl_for(method), policy, async {
            self.request_with_retry(Method::GET, &url, params, None).await
        })
        .await
    }

    /// POST to the Web API with a form body. Never cached.
    pub async fn post(
        &self,
        interface: &str,
        method: &str,
        version: u32,
        params: &Params,
        form: &Params,
    ) -> Result<Value> {
        let url = self.build_url(interface, method, version);
        self.request_with_retry(Method::POST, &url, params, Some(form))
            .await
    }

    // == Store API ==
    /// GET `{store_base}/{endpoint}`. No API key is sent.
    pub async fn get_store_api(
        &self,
        endpoint: &str,
        params: &Params,
        policy: CachePolicy,
    ) -> Result<Value> {
        let url = format!("{}/{}", self.store_base_url, endpoint);
        let cache_endpoint = format!("store.{}", endpoint);

        let mut query = query_pairs(params);
        query.retain(|(name, _)| name != "key");

        self.cache_aside(&cache_endpoint, params, ttl_for(endpoint), policy, async {
            self.fetch_once(&url, &query, "Store API error").await
        })
        .await
    }

    // == Raw ==
    /// GET an arbitrary URL without credentials. Rate limited, never cached.
    pub async fn get_raw(&self, url: &str, params: &Params) -> Result<Value> {
        self.fetch_once(url, &query_pairs(params), "Request error")
            .await
    }

    // == Convenience ==
    /// Resolves a vanity URL name to a SteamID64.
    ///
    /// Any API failure is logged and reported as `None`.
    pub async fn resolve_vanity_url(&self, vanity_name: &str) -> Option<String> {
        let mut params = Params::new();
        params.insert("vanityurl".to_string(), json!(vanity_name));

        match self
            .get("ISteamUser", "ResolveVanityURL", 1, &params, CachePolicy::Use)
            .await
        {
            Ok(result) => {
                let response = &result["response"];
                if response["success"].as_i64() == Some(1) {
                    response["steamid"].as_str().map(str::to_string)
                } else {
                    None
                }
            }
            Err(e) => {
                warn!(vanity_name, error = %e, "vanity URL resolution failed");
                None
            }
        }
    }

    /// Fetches player summaries for up to 100 SteamID64s.
    pub async fn get_player_summaries(&self, steam_ids: &[String]) -> Result<Vec<Value>> {
        if steam_ids.len() > MAX_PLAYER_SUMMARY_IDS {
            return Err(SteamApiError::Validation(format!(
                "Maximum {} Steam IDs per request",
                MAX_PLAYER_SUMMARY_IDS
            )));
        }

        let mut params = Params::new();
        params.insert("steamids".to_string(), json!(steam_ids.join(",")));

        let result = self
            .get("ISteamUser", "GetPlayerSummaries", 2, &params, CachePolicy::Use)
            .await?;

        Ok(result["response"]["players"]
            .as_array()
            .cloned()
            .unwrap_or_default())
    }

    /// True when a player summary reports a public profile.
    pub fn is_profile_public(player_summary: &Value) -> bool {
        player_summary["communityvisibilitystate"].as_i64() == Some(3)
    }

    // == Internals ==
    fn build_url(&self, interface: &str, method: &str, version: u32) -> String {
        format!("{}/{}/{}/v{}/", self.api_base_url, interface, method, version)
    }

    /// Serves from cache when allowed, otherwise runs `fetch` and stores the
    /// result under the caller's original parameters.
    async fn cache_aside<F>(
        &self,
        endpoint: &str,
        params: &Params,
        ttl: Duration,
        policy: CachePolicy,
        fetch: F,
    ) -> Result<Value>
    where
        F: Future<Output = Result<Value>>,
    {
        let Some(cache) = &self.cache else {
            return fetch.await;
        };

        if policy == CachePolicy::Use {
            if let Some(value) = cache.get(endpoint, params).await {
                debug!(endpoint, "serving cached response");
                return Ok(value);
            }
        }

        let value = fetch.await?;
        cache.set(endpoint, params, value.clone(), Some(ttl)).await;
        Ok(value)
    }

    async fn request_with_retry(
        &self,
        method: Method,
        url: &str,
        params: &Params,
        form: Option<&Params>,
    ) -> Result<Value> {
        let mut query = query_pairs(params);
        query.retain(|(name, _)| name != "key" && name != "format");
        query.push(("key".to_string(), self.api_key.clone()));
        query.push(("format".to_string(), "json".to_string()));
        let form = form.map(query_pairs);

        let mut last_failure = String::new();

        for attempt in 0..self.max_retries {
            self.rate_limiter.acquire().await;

            let mut request = self
                .http
                .request(method.clone(), url)
                .header(ACCEPT, "application/json")
                .query(&query);
            if let Some(form) = &form {
                request = request.form(form);
            }

            let outcome = match request.send().await {
                Ok(response) => self.classify(response, attempt).await?,
                Err(e) if e.is_timeout() => Attempt::Retry {
                    reason: format!("request timed out: {}", e),
                    backoff: self.backoff(attempt),
                },
                Err(e) => return Err(SteamApiError::from_transport("HTTP error", e)),
            };

            match outcome {
                Attempt::Done(value) => return Ok(value),
                Attempt::Retry { reason, backoff } => {
                    warn!(
                        url,
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        %reason,
                        "transient Steam API failure"
                    );
                    last_failure = reason;
                    if attempt + 1 < self.max_retries {
                        tokio::time::sleep(backoff).await;
                    }
                }
            }
        }

        Err(SteamApiError::RetriesExhausted {
            attempts: self.max_retries,
            last_failure,
        })
    }

    /// Applies the status-code policy to one Web API response.
    async fn classify(&self, response: Response, attempt: u32) -> Result<Attempt> {
        let status = response.status();
        let code = status.as_u16();

        if is_html(&response) {
            return Err(SteamApiError::MalformedResponse {
                status: Some(code),
                message: "Steam API returned HTML error page".to_string(),
            });
        }

        match code {
            429 => {
                return Ok(Attempt::Retry {
                    reason: "rate limited by Steam (429)".to_string(),
                    backoff: self.backoff(attempt + 1),
                })
            }
            403 => {
                return Err(SteamApiError::Unauthorized {
                    status: code,
                    message: "Access forbidden - check API key permissions".to_string(),
                })
            }
            401 => {
                return Err(SteamApiError::Unauthorized {
                    status: code,
                    message: "Invalid API key".to_string(),
                })
            }
            _ => {}
        }

        if status.is_server_error() {
            return Ok(Attempt::Retry {
                reason: format!("server error {}", code),
                backoff: self.backoff(attempt),
            });
        }

        if !status.is_success() {
            return Err(SteamApiError::Http {
                status: Some(code),
                message: format!("Steam API returned status {}", status),
            });
        }

        // The client timeout also covers the body, which can stall after the headers
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => {
                return Ok(Attempt::Retry {
                    reason: format!("timed out reading response body: {}", e),
                    backoff: self.backoff(attempt),
                })
            }
            Err(e) => return Err(SteamApiError::from_transport("HTTP error", e)),
        };

        Ok(Attempt::Done(normalize_response(decode_json(&body, code)?)))
    }

    /// One rate-limited GET with no retry, used by the Store API and raw URLs.
    async fn fetch_once(
        &self,
        url: &str,
        query: &[(String, String)],
        context: &str,
    ) -> Result<Value> {
        self.rate_limiter.acquire().await;

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| SteamApiError::from_transport(context, e))?;

        let status = response.status();
        if is_html(&response) {
            return Err(SteamApiError::MalformedResponse {
                status: Some(status.as_u16()),
                message: format!("{}: received HTML instead of JSON", context),
            });
        }
        if !status.is_success() {
            return Err(SteamApiError::Http {
                status: Some(status.as_u16()),
                message: format!("{}: status {}", context, status),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SteamApiError::from_transport(context, e))?;
        decode_json(&body, status.as_u16())
    }

    /// `base * 2^exponent`
    fn backoff(&self, exponent: u32) -> Duration {
        self.retry_backoff
            .saturating_mul(2u32.saturating_pow(exponent))
    }
}

fn is_html(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/html"))
        .unwrap_or(false)
}

fn decode_json(body: &[u8], status: u16) -> Result<Value> {
    serde_json::from_slice(body).map_err(|e| SteamApiError::MalformedResponse {
        status: Some(status),
        message: format!("invalid JSON body: {}", e),
    })
}

/// Wraps non-object payloads as `{"data": payload}`.
///
/// Steam's wrapper keys (`response`, `playerstats`, `appnews`, ...) are left
/// as they are; callers unwrap the one their endpoint uses.
pub fn normalize_response(data: Value) -> Value {
    match data {
        Value::Object(_) => data,
        other => json!({ "data": other }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config::default().with_api_key("test_key")
    }

    #[test]
    fn test_missing_api_key_fails() {
        let result = SteamClient::with_dedicated_limiter(&Config::default());
        assert!(matches!(result, Err(SteamApiError::Config(_))));
    }

    #[test]
    fn test_cache_enabled_by_default() {
        let client = SteamClient::with_dedicated_limiter(&test_config()).unwrap();
        let cache = client.cache().expect("cache should be enabled");
        assert_eq!(cache.max_entries(), 1000);
    }

    #[test]
    fn test_cache_can_be_disabled() {
        let config = Config {
            cache_enabled: false,
            ..test_config()
        };
        let client = SteamClient::with_dedicated_limiter(&config).unwrap();
        assert!(client.cache().is_none());
    }

    #[test]
    fn test_cache_max_size_configurable() {
        let config = Config {
            cache_max_entries: 500,
            ..test_config()
        };
        let client = SteamClient::with_dedicated_limiter(&config).unwrap();
        assert_eq!(client.cache().unwrap().max_entries(), 500);
    }

    #[test]
    fn test_dedicated_limiter_uses_config_rate() {
        let config = Config {
            requests_per_second: 5.0,
            ..test_config()
        };
        let client = SteamClient::with_dedicated_limiter(&config).unwrap();
        assert_eq!(client.rate_limiter().requests_per_second(), 5.0);
    }

    #[test]
    fn test_clients_can_share_limiter() {
        let limiter = Arc::new(RateLimiter::new(20.0).unwrap());
        let a = SteamClient::new(&test_config(), limiter.clone()).unwrap();
        let b = SteamClient::new(&test_config(), limiter.clone()).unwrap();
        assert!(Arc::ptr_eq(a.rate_limiter(), b.rate_limiter()));
    }

    #[test]
    fn test_close_releases_client_resources() {
        let limiter = Arc::new(RateLimiter::new(20.0).unwrap());
        let client = SteamClient::new(&test_config(), limiter.clone()).unwrap();
        assert_eq!(Arc::strong_count(&limiter), 2);

        client.close();
        assert_eq!(Arc::strong_count(&limiter), 1);
    }

    #[test]
    fn test_build_url() {
        let config = Config {
            api_base_url: "http://localhost:9000/".to_string(),
            ..test_config()
        };
        let client = SteamClient::with_dedicated_limiter(&config).unwrap();
        assert_eq!(
            client.build_url("ISteamUser", "GetPlayerSummaries", 2),
            "http://localhost:9000/ISteamUser/GetPlayerSummaries/v2/"
        );
    }

    #[test]
    fn test_backoff_is_exponential() {
        let config = Config {
            retry_backoff: Duration::from_millis(100),
            ..test_config()
        };
        let client = SteamClient::with_dedicated_limiter(&config).unwrap();
        assert_eq!(client.backoff(0), Duration::from_millis(100));
        assert_eq!(client.backoff(1), Duration::from_millis(200));
        assert_eq!(client.backoff(3), Duration::from_millis(800));
    }

    #[test]
    fn test_decode_json() {
        assert_eq!(decode_json(br#"{"ok":true}"#, 200).unwrap(), json!({"ok": true}));
        assert!(matches!(
            decode_json(b"{\"a\":", 200),
            Err(SteamApiError::MalformedResponse {
                status: Some(200),
                ..
            })
        ));
    }

    #[test]
    fn test_normalize_response() {
        let wrapped = json!({"response": {"players": []}});
        assert_eq!(normalize_response(wrapped.clone()), wrapped);
        assert_eq!(normalize_response(json!([1, 2])), json!({"data": [1, 2]}));
        assert_eq!(normalize_response(json!(true)), json!({"data": true}));
    }

    #[test]
    fn test_is_profile_public() {
        assert!(SteamClient::is_profile_public(
            &json!({"communityvisibilitystate": 3})
        ));
        assert!(!SteamClient::is_profile_public(
            &json!({"communityvisibilitystate": 1})
        ));
        assert!(!SteamClient::is_profile_public(&json!({})));
    }

    #[tokio::test]
    async fn test_cache_admin_when_disabled() {
        let config = Config {
            cache_enabled: false,
            ..test_config()
        };
        let client = SteamClient::with_dedicated_limiter(&config).unwrap();
        assert_eq!(client.clear_cache().await, 0);
        assert!(client.cache_stats().await.is_none());
    }

    #[tokio::test]
    async fn test_clear_cache_returns_count() {
        let client = SteamClient::with_dedicated_limiter(&test_config()).unwrap();
        let cache = client.cache().unwrap();
        cache.set("key1", &Params::new(), json!({"data": 1}), None).await;
        cache.set("key2", &Params::new(), json!({"data": 2}), None).await;

        assert_eq!(client.clear_cache().await, 2);
        assert_eq!(client.cache_stats().await.unwrap().size, 0);
    }

    #[tokio::test]
    async fn test_too_many_player_ids_rejected() {
        let client = SteamClient::with_dedicated_limiter(&test_config()).unwrap();
        let ids: Vec<String> = (0..101).map(|i| format!("7656119800000{:04}", i)).collect();

        let result = client.get_player_summaries(&ids).await;
        assert!(matches!(result, Err(SteamApiError::Validation(_))));
    }
}
