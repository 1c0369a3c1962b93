//! Rate-limited batch fetching.
//!
//! The Riot development key allows 20 requests/second and 100 requests per
//! two minutes. [`RateLimitedFetcher`] stays under that budget by dispatching
//! requests in fixed-size batches, waiting between batches, retrying throttled
//! calls after a long delay, and serving repeat keys from a TTL cache.
//!
//! Per-request failures never escape [`RateLimitedFetcher::fetch_all`]: every
//! input request maps to exactly one [`FetchOutcome`], in input order, and a
//! failed request simply carries no value. Callers aggregate whatever was
//! fetched and skip the rest.

pub mod cache;
pub mod retry;

use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;

use crate::error::AppError;
use cache::TtlCache;
use retry::RetryPolicy;

/// One unit of fetch work: a cache/identity key plus the network call that
/// produces the value.
#[async_trait]
pub trait Fetch: Send + Sync {
    type Output: Clone + Send + Sync + 'static;

    /// Identity of this request. Used to map results back to inputs and as
    /// the cache key, so it must incorporate every parameter that affects
    /// the response.
    fn key(&self) -> &str;

    async fn execute(&self) -> Result<Self::Output, FetchError>;
}

/// How a single fetch attempt failed.
///
/// Only `Throttled` is retried. Everything else collapses to a failed
/// outcome for the caller; the distinction survives in the logs.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("rate limited by remote service")]
    Throttled,

    #[error("transient failure: {0}")]
    Transient(String),

    #[error("permanent failure: {0}")]
    Permanent(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Success,
    CacheHit,
    Failed,
}

/// Per-request result of [`RateLimitedFetcher::fetch_all`]. Outcomes come
/// back in input order, one per request, so callers can zip them against
/// the inputs positionally.
#[derive(Debug, Clone)]
pub struct FetchOutcome<T> {
    pub key: String,
    pub status: OutcomeStatus,
    pub value: Option<T>,
}

impl<T> FetchOutcome<T> {
    fn success(key: &str, value: T) -> Self {
        FetchOutcome {
            key: key.to_string(),
            status: OutcomeStatus::Success,
            value: Some(value),
        }
    }

    fn cache_hit(key: &str, value: T) -> Self {
        FetchOutcome {
            key: key.to_string(),
            status: OutcomeStatus::CacheHit,
            value: Some(value),
        }
    }

    fn failed(key: &str) -> Self {
        FetchOutcome {
            key: key.to_string(),
            status: OutcomeStatus::Failed,
            value: None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == OutcomeStatus::Failed
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }
}

/// Tuning knobs for [`RateLimitedFetcher`]. Defaults mirror the Riot
/// development-key budget: batches of 10 with 200ms between them, one retry
/// after 3s on a 429.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Maximum number of requests in flight at once.
    pub batch_size: usize,
    /// Pause between consecutive batches (none after the final batch).
    pub inter_batch_delay: Duration,
    /// Retries allowed per request, on throttling only.
    pub max_retries: u32,
    /// Wait before each retry; must be long enough to clear a rate-limit
    /// window.
    pub retry_delay: Duration,
    /// Zero disables caching.
    pub cache_ttl: Duration,
    /// Resident-entry cap for the cache (FIFO eviction).
    pub cache_capacity: usize,
    /// Deadline for a single attempt; an attempt that exceeds it counts as
    /// a failure, not a throttle.
    pub request_timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        FetcherConfig {
            batch_size: 10,
            inter_batch_delay: Duration::from_millis(200),
            max_retries: 1,
            retry_delay: Duration::from_millis(3000),
            cache_ttl: Duration::ZERO,
            cache_capacity: 1024,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl FetcherConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.batch_size == 0 {
            return Err(AppError::ConfigError(
                "fetcher batch_size must be at least 1".to_string(),
            ));
        }
        if !self.cache_ttl.is_zero() && self.cache_capacity == 0 {
            return Err(AppError::ConfigError(
                "fetcher cache_capacity must be at least 1 when the cache is enabled".to_string(),
            ));
        }
        Ok(())
    }
}

/// Executes independent fetches against a rate-limited remote service.
///
/// The fetcher owns its cache and holds no other cross-call state; a single
/// instance is meant to live as long as the service it talks to.
pub struct RateLimitedFetcher<T> {
    config: FetcherConfig,
    retry: RetryPolicy,
    cache: TtlCache<T>,
}

impl<T: Clone + Send + Sync + 'static> RateLimitedFetcher<T> {
    /// Fails only on a malformed config; nothing else in this module
    /// returns an error.
    pub fn new(config: FetcherConfig) -> Result<Self, AppError> {
        config.validate()?;
        let retry = RetryPolicy::new(config.max_retries, config.retry_delay);
        let cache = TtlCache::new(config.cache_ttl, config.cache_capacity);
        Ok(RateLimitedFetcher {
            config,
            retry,
            cache,
        })
    }

    /// Executes every request and returns one outcome per request, in input
    /// order. Never fails as a whole: per-request errors become `Failed`
    /// outcomes.
    ///
    /// Duplicate keys in one call are not deduplicated; each is fetched (or
    /// served from cache) independently and same-key cache writes are
    /// last-write-wins.
    pub async fn fetch_all<R>(&self, requests: &[R]) -> Vec<FetchOutcome<T>>
    where
        R: Fetch<Output = T>,
    {
        self.fetch_all_with_cancel(requests, &CancellationToken::new())
            .await
    }

    /// Like [`fetch_all`](Self::fetch_all), but stops dispatching once
    /// `cancel` fires. In-flight attempts are abandoned and every request
    /// without a settled result reports `Failed`, so an abandoned caller
    /// does not keep burning rate-limit budget.
    pub async fn fetch_all_with_cancel<R>(
        &self,
        requests: &[R],
        cancel: &CancellationToken,
    ) -> Vec<FetchOutcome<T>>
    where
        R: Fetch<Output = T>,
    {
        if requests.is_empty() {
            return Vec::new();
        }

        let batches: Vec<&[R]> = requests.chunks(self.config.batch_size).collect();
        let batch_count = batches.len();
        let mut outcomes = Vec::with_capacity(requests.len());

        for (index, batch) in batches.into_iter().enumerate() {
            if cancel.is_cancelled() {
                outcomes.extend(batch.iter().map(|r| FetchOutcome::failed(r.key())));
                continue;
            }

            tracing::debug!(
                batch = index + 1,
                total = batch_count,
                size = batch.len(),
                "dispatching batch"
            );
            let settled = join_all(batch.iter().map(|r| self.run_one(r, cancel))).await;
            outcomes.extend(settled);

            // No trailing delay after the final batch.
            if index + 1 < batch_count && !cancel.is_cancelled() {
                sleep(self.config.inter_batch_delay).await;
            }
        }

        outcomes
    }

    async fn run_one<R>(&self, request: &R, cancel: &CancellationToken) -> FetchOutcome<T>
    where
        R: Fetch<Output = T>,
    {
        let key = request.key();

        if let Some(value) = self.cache.get(key) {
            tracing::debug!(key, "cache hit");
            return FetchOutcome::cache_hit(key, value);
        }

        let mut retries_used = 0u32;
        loop {
            let attempt = tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!(key, "fetch cancelled");
                    return FetchOutcome::failed(key);
                }
                result = timeout(self.config.request_timeout, request.execute()) => result,
            };

            match attempt {
                Ok(Ok(value)) => {
                    self.cache.insert(key, value.clone());
                    return FetchOutcome::success(key, value);
                }
                Ok(Err(FetchError::Throttled)) => {
                    if !self.retry.should_retry(retries_used) {
                        tracing::warn!(
                            key,
                            attempts = retries_used + 1,
                            "throttled, retries exhausted"
                        );
                        return FetchOutcome::failed(key);
                    }
                    retries_used += 1;
                    tracing::warn!(
                        key,
                        retry = retries_used,
                        delay_ms = self.retry.delay().as_millis() as u64,
                        "throttled, waiting before retry"
                    );
                    tokio::select! {
                        _ = cancel.cancelled() => return FetchOutcome::failed(key),
                        _ = sleep(self.retry.delay()) => {}
                    }
                }
                Ok(Err(err)) => {
                    tracing::warn!(key, %err, "fetch failed");
                    return FetchOutcome::failed(key);
                }
                Err(_) => {
                    tracing::warn!(
                        key,
                        timeout_ms = self.config.request_timeout.as_millis() as u64,
                        "fetch timed out"
                    );
                    return FetchOutcome::failed(key);
                }
            }
        }
    }
}
