//! Listings gateway - cache, rate limit and retry around the listings provider

use std::sync::Arc;
use std::time::Instant;

use crate::domain::{
    CompQuery, DomainError, ListingSource, ListingsBatch, ListingsProvider, RawListing,
    RetryPolicy, Sleeper, TokioSleeper,
};
use crate::infrastructure::cache::{CacheStats, TtlCache};
use crate::infrastructure::observability::{
    record_cache_lookup, record_mock_fallback, record_provider_request, record_provider_retry,
};
use crate::infrastructure::rate_limit::RateLimiter;

/// Maximum number of raw listings requested per provider call
pub const CANDIDATE_LIMIT: u32 = 50;

const CACHE_NAMESPACE: &str = "listings";

pub type ListingsCache = TtlCache<String, Arc<Vec<RawListing>>>;

/// Where candidate listings come from, fixed when the gateway is built
#[derive(Debug, Clone)]
pub enum ListingsBackend {
    /// Real provider, optionally degrading to a generator when it cannot be reached
    Live {
        provider: Arc<dyn ListingsProvider>,
        fallback: Option<Arc<dyn ListingsProvider>>,
    },
    /// Generator only; the provider is not configured
    Synthetic(Arc<dyn ListingsProvider>),
}

impl ListingsBackend {
    pub fn live(provider: Arc<dyn ListingsProvider>) -> Self {
        Self::Live {
            provider,
            fallback: None,
        }
    }

    pub fn live_with_fallback(
        provider: Arc<dyn ListingsProvider>,
        fallback: Arc<dyn ListingsProvider>,
    ) -> Self {
        Self::Live {
            provider,
            fallback: Some(fallback),
        }
    }

    pub fn synthetic(generator: Arc<dyn ListingsProvider>) -> Self {
        Self::Synthetic(generator)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Live { provider, .. } => provider.provider_name(),
            Self::Synthetic(generator) => generator.provider_name(),
        }
    }
}

/// Fetches candidate batches for a query
#[derive(Debug)]
pub struct ListingsGateway {
    backend: ListingsBackend,
    cache: Arc<ListingsCache>,
    limiter: Arc<RateLimiter>,
    retry: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl ListingsGateway {
    pub fn new(
        backend: ListingsBackend,
        cache: Arc<ListingsCache>,
        limiter: Arc<RateLimiter>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            backend,
            cache,
            limiter,
            retry,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    /// Fetch candidates for `query` from the cache, the provider or the generator
    pub async fn fetch(&self, query: &CompQuery) -> Result<ListingsBatch, DomainError> {
        let (provider, fallback) = match &self.backend {
            ListingsBackend::Synthetic(generator) => {
                return self.fetch_synthetic(generator.as_ref(), query).await;
            }
            ListingsBackend::Live { provider, fallback } => (provider, fallback),
        };

        let key = query.cache_key(CACHE_NAMESPACE).to_string();

        if let Some(listings) = self.cache.get(&key).await {
            record_cache_lookup(CACHE_NAMESPACE, true);
            tracing::debug!(key = %key, count = listings.len(), "Listings cache hit");
            return Ok(ListingsBatch::new(listings, ListingSource::Cache));
        }

        record_cache_lookup(CACHE_NAMESPACE, false);

        match self.fetch_with_retry(provider.as_ref(), query).await {
            Ok(listings) => {
                let listings = Arc::new(listings);
                self.cache.insert(key, listings.clone()).await;
                Ok(ListingsBatch::new(listings, ListingSource::Provider))
            }
            Err(e) => match fallback {
                Some(generator) if e.is_unreachable() => {
                    tracing::warn!(
                        provider = provider.provider_name(),
                        error = %e,
                        "Listings provider unreachable, serving synthetic listings"
                    );
                    record_mock_fallback(provider.provider_name());

                    self.fetch_synthetic(generator.as_ref(), query).await
                }
                _ => Err(unavailable(provider.provider_name(), e)),
            },
        }
    }

    async fn fetch_synthetic(
        &self,
        generator: &dyn ListingsProvider,
        query: &CompQuery,
    ) -> Result<ListingsBatch, DomainError> {
        let listings = generator.fetch_listings(query, CANDIDATE_LIMIT).await?;

        tracing::debug!(count = listings.len(), "Generated synthetic listings");

        Ok(ListingsBatch::new(Arc::new(listings), ListingSource::Mock))
    }

    /// Bounded retry loop; every attempt takes a rate limiter permit first
    async fn fetch_with_retry(
        &self,
        provider: &dyn ListingsProvider,
        query: &CompQuery,
    ) -> Result<Vec<RawListing>, DomainError> {
        let name = provider.provider_name();
        let mut retry = 0;

        loop {
            self.limiter.acquire(name).await?;

            let started = Instant::now();
            let result = provider.fetch_listings(query, CANDIDATE_LIMIT).await;
            record_provider_request(name, result.is_ok(), started.elapsed());

            match result {
                Ok(listings) => {
                    tracing::info!(
                        provider = name,
                        count = listings.len(),
                        attempts = retry + 1,
                        "Fetched listings"
                    );
                    return Ok(listings);
                }
                Err(e) if e.is_retryable() && retry < self.retry.max_retries => {
                    let delay = self.retry.backoff(retry);

                    tracing::warn!(
                        provider = name,
                        attempt = retry + 1,
                        max_attempts = self.retry.max_attempts(),
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Listings request failed, retrying"
                    );
                    record_provider_retry(name);

                    self.sleeper.sleep(delay).await;
                    retry += 1;
                }
                Err(e) => {
                    if e.is_retryable() {
                        tracing::error!(
                            provider = name,
                            attempts = retry + 1,
                            error = %e,
                            "Listings retries exhausted"
                        );
                    }
                    return Err(e);
                }
            }
        }
    }
}

/// Raw upstream failures surface as `ProviderUnavailable`; other kinds pass through
fn unavailable(provider: &str, error: DomainError) -> DomainError {
    match error {
        DomainError::Upstream {
            status, message, ..
        } => {
            tracing::error!(provider, ?status, %message, "Listings provider failed");
            DomainError::provider_unavailable("Listings provider is unavailable")
        }
        other => other,
    }
}
