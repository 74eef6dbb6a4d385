//! Fixed exponential-backoff retry for transient backend failures

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use super::rest::RestError;

/// Retry parameters for remote writes.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles each retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Run `operation`, retrying transient failures up to the policy's attempt
/// budget. Non-transient failures return after the first attempt.
pub(crate) async fn with_retry<T, F, Fut>(policy: &RetryPolicy, operation: F) -> Result<T, RestError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, RestError>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < policy.max_attempts => {
                let delay = policy.base_delay * 2u32.pow(attempt - 1);
                debug!(attempt, delay_ms = delay.as_millis() as u64, error = %e, "retrying transient backend failure");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
