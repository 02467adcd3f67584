//! Sliding window rate limiter keyed by provider

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::Mutex;

use crate::domain::DomainError;

/// Permits per window for every key
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Requests allowed per second for each provider key. Zero disables limiting.
    pub requests_per_second: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 20,
        }
    }
}

impl RateLimitConfig {
    pub fn new(requests_per_second: u32) -> Self {
        Self {
            requests_per_second,
        }
    }

    pub fn unlimited() -> Self {
        Self::new(0)
    }

    pub fn is_unlimited(&self) -> bool {
        self.requests_per_second == 0
    }
}

/// Result of a rate limit check
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitResult {
    /// Whether the request is allowed
    pub allowed: bool,
    /// Remaining permits in the current window
    pub remaining: u32,
    /// Total permits per window
    pub limit: u32,
    /// Time until the oldest permit in the window expires
    pub reset_in: Duration,
}

/// Shared rate limiter for outbound provider calls
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    window: Duration,
    records: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    /// Create a limiter with a one second window
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_window(config, Duration::from_secs(1))
    }

    pub fn with_window(config: RateLimitConfig, window: Duration) -> Self {
        Self {
            config,
            window,
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Check and record in one operation
    pub async fn check_and_record(&self, key: &str) -> RateLimitResult {
        let limit = self.config.requests_per_second;

        if self.config.is_unlimited() {
            return RateLimitResult {
                allowed: true,
                remaining: u32::MAX,
                limit,
                reset_in: Duration::ZERO,
            };
        }

        let now = Instant::now();
        let mut records = self.records.lock().await;
        let key_records = records.entry(key.to_string()).or_default();

        while key_records
            .front()
            .is_some_and(|t| now.duration_since(*t) >= self.window)
        {
            key_records.pop_front();
        }

        let in_window = key_records.len() as u32;

        if in_window >= limit {
            let reset_in = key_records
                .front()
                .map(|t| self.window.saturating_sub(now.duration_since(*t)))
                .unwrap_or(self.window);

            return RateLimitResult {
                allowed: false,
                remaining: 0,
                limit,
                reset_in,
            };
        }

        key_records.push_back(now);

        RateLimitResult {
            allowed: true,
            remaining: limit - in_window - 1,
            limit,
            reset_in: self.window,
        }
    }

    /// Acquire a permit for `key` or fail with `RateLimited`
    pub async fn acquire(&self, key: &str) -> Result<(), DomainError> {
        let result = self.check_and_record(key).await;

        if result.allowed {
            return Ok(());
        }

        tracing::warn!(
            key,
            limit = result.limit,
            reset_in_ms = result.reset_in.as_millis() as u64,
            "Provider rate limit reached"
        );

        Err(DomainError::rate_limited(format!(
            "Too many requests to {}; retry in {}ms",
            key,
            result.reset_in.as_millis()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_allows_first_request() {
        let limiter = RateLimiter::new(RateLimitConfig::new(10));

        let result = limiter.check_and_record("rentcast").await;

        assert!(result.allowed);
        assert_eq!(result.remaining, 9);
        assert_eq!(result.limit, 10);
    }

    #[tokio::test]
    async fn test_blocks_over_limit() {
        let limiter = RateLimiter::new(RateLimitConfig::new(2));

        assert!(limiter.check_and_record("rentcast").await.allowed);
        assert!(limiter.check_and_record("rentcast").await.allowed);

        let result = limiter.check_and_record("rentcast").await;
        assert!(!result.allowed);
        assert_eq!(result.remaining, 0);
    }

    #[tokio::test]
    async fn test_acquire_maps_to_rate_limited() {
        let limiter = RateLimiter::new(RateLimitConfig::new(1));

        assert!(limiter.acquire("rentcast").await.is_ok());

        let err = limiter.acquire("rentcast").await.unwrap_err();
        assert!(matches!(err, DomainError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let limiter = RateLimiter::new(RateLimitConfig::new(1));

        assert!(limiter.acquire("rentcast").await.is_ok());
        assert!(limiter.acquire("opencage").await.is_ok());
        assert!(limiter.acquire("rentcast").await.is_err());
    }

    #[tokio::test]
    async fn test_window_slides() {
        let limiter = RateLimiter::with_window(RateLimitConfig::new(1), Duration::from_millis(50));

        assert!(limiter.acquire("rentcast").await.is_ok());
        assert!(limiter.acquire("rentcast").await.is_err());

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert!(limiter.acquire("rentcast").await.is_ok());
    }

    #[tokio::test]
    async fn test_unlimited() {
        let limiter = RateLimiter::new(RateLimitConfig::unlimited());

        for _ in 0..1000 {
            assert!(limiter.acquire("rentcast").await.is_ok());
        }
    }
}
