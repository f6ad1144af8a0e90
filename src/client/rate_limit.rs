//! Rate Limiting
//!
//! Minimum-interval gate for outbound requests, plus a pool that hands out
//! shared limiters by scope.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::error::{Result, SteamApiError};

// == Rate Limiter ==
/// Ensures consecutive grants are at least `1 / requests_per_second` apart.
///
/// The lock is held across the wait, so concurrent callers are granted one
/// at a time in the order they queued.
#[derive(Debug)]
pub struct RateLimiter {
    requests_per_second: f64,
    min_interval: Duration,
    last_grant: Mutex<Option<Instant>>,
}

impl RateLimiter {
    // == Constructor ==
    /// Creates a limiter; the rate must be positive and finite.
    pub fn new(requests_per_second: f64) -> Result<Self> {
        if !requests_per_second.is_finite() || requests_per_second <= 0.0 {
            return Err(SteamApiError::Validation(format!(
                "requests_per_second must be positive, got {}",
                requests_per_second
            )));
        }

        let min_interval = Duration::try_from_secs_f64(1.0 / requests_per_second).map_err(|_| {
            SteamApiError::Validation(format!(
                "requests_per_second is too small, got {}",
                requests_per_second
            ))
        })?;

        Ok(Self {
            requests_per_second,
            min_interval,
            last_grant: Mutex::new(None),
        })
    }

    /// Configured request rate.
    pub fn requests_per_second(&self) -> f64 {
        self.requests_per_second
    }

    /// Minimum spacing between grants.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    // == Acquire ==
    /// Waits until a request may be sent, then records the grant.
    pub async fn acquire(&self) {
        let mut last_grant = self.last_grant.lock().await;

        if let Some(previous) = *last_grant {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!(?wait, "rate limiter delaying request");
                sleep(wait).await;
            }
        }

        *last_grant = Some(Instant::now());
    }
}

// == Rate Limiter Pool ==
/// Hands out one shared [`RateLimiter`] per named scope.
///
/// Clients built from the same scope throttle collectively. The pool is an
/// ordinary value owned by the application; nothing here is global.
#[derive(Debug, Default)]
pub struct RateLimiterPool {
    limiters: Mutex<HashMap<String, Arc<RateLimiter>>>,
}

impl RateLimiterPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the limiter for `scope`, creating it at `requests_per_second`
    /// on first use. Later calls return the existing instance unchanged.
    pub async fn get_or_create(
        &self,
        scope: &str,
        requests_per_second: f64,
    ) -> Result<Arc<RateLimiter>> {
        let mut limiters = self.limiters.lock().await;

        if let Some(limiter) = limiters.get(scope) {
            return Ok(limiter.clone());
        }

        let limiter = Arc::new(RateLimiter::new(requests_per_second)?);
        info!(scope, requests_per_second, "created shared rate limiter");
        limiters.insert(scope.to_string(), limiter.clone());
        Ok(limiter)
    }

    /// Drops every pooled limiter so the next lookup builds a fresh one.
    ///
    /// Intended for test harnesses.
    pub async fn reset(&self) {
        self.limiters.lock().await.clear();
    }

    /// Number of scopes currently pooled.
    pub async fn len(&self) -> usize {
        self.limiters.lock().await.len()
    }

    /// Returns true if no limiter has been created yet.
    pub async fn is_empty(&self) -> bool {
        self.limiters.lock().await.is_empty()
    }
}
