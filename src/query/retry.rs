//! Retry with capped exponential backoff

use std::future::Future;
use std::time::Duration;

use crate::api::{ApiError, ApiResult};

/// Delay before the first retry
pub const BASE_DELAY: Duration = Duration::from_millis(1000);

/// Upper bound on any single delay
pub const MAX_DELAY: Duration = Duration::from_millis(30_000);

/// How often and how patiently a failed query is repeated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first failure
    pub attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Give up at once on errors [`ApiError::is_retryable`] calls final
    pub skip_client_errors: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2)
    }
}

impl RetryPolicy {
    pub fn new(attempts: u32) -> Self {
        Self {
            attempts,
            base_delay: BASE_DELAY,
            max_delay: MAX_DELAY,
            skip_client_errors: false,
        }
    }

    pub fn none() -> Self {
        Self::new(0)
    }

    /// Stop retrying 4xx responses (other than 408 and 429) and bad payloads
    pub fn skip_client_errors(mut self) -> Self {
        self.skip_client_errors = true;
        self
    }

    /// Delay before retry `n` (0-based): `min(base * 2^n, max)`
    pub fn delay_for(&self, n: u32) -> Duration {
        let factor = 1u32.checked_shl(n).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Whether a failure after `retries` retries should be retried
    ///
    /// Every error is retried unless [`skip_client_errors`](Self::skip_client_errors)
    /// was set.
    pub fn should_retry(&self, retries: u32, error: &ApiError) -> bool {
        retries < self.attempts && (!self.skip_client_errors || error.is_retryable())
    }

    /// Run `op` until it succeeds, fails for good or retries run out
    pub async fn run<T, F, Fut>(&self, mut op: F) -> ApiResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let mut retries = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if self.should_retry(retries, &e) => {
                    let delay = self.delay_for(retries);
                    tracing::warn!(
                        retry = retries + 1,
                        of = self.attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Query failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    retries += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
