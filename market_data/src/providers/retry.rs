//! Bounded retry with exponential backoff for provider calls.
//!
//! Transient failures (network errors, throttling, 5xx) are retried up to
//! `max_retries` times with delays of `base_delay * 2^attempt`. Permanent
//! failures (validation, decode, API rejections) are surfaced immediately.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::providers::ProviderError;

/// Retry knobs for a provider fetch.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each subsequent one.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay_ms: u64) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_millis(base_delay_ms),
        }
    }
}

/// Runs `op` until it succeeds, fails permanently, or exhausts the policy.
///
/// `op` is a closure producing a fresh future per attempt, so the request
/// parameters are re-captured each time.
pub async fn with_retry<T, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut attempt = 0u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < policy.max_retries => {
                let delay = policy.base_delay * 2u32.saturating_pow(attempt);
                warn!(
                    attempt = attempt + 1,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "transient provider error, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
