use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::LlmError;

/// Bounded exponential backoff for remote calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first one.
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each retry after that.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based): base, 2*base, 4*base, ...
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(retry.saturating_sub(1))
    }
}

/// Runs `op` until it succeeds, the retries run out, or it fails with a
/// quota-exhausted error. Quota errors are returned immediately since retrying
/// them only burns more quota.
pub async fn with_backoff<T, F, Fut>(policy: RetryPolicy, label: &str, mut op: F) -> Result<T, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    let mut retry = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_quota_exhausted() => return Err(e),
            Err(e) if retry >= policy.max_retries => {
                warn!("{label} failed after {} retries: {e}", policy.max_retries);
                return Err(e);
            }
            Err(e) => {
                retry += 1;
                let delay = policy.delay_for(retry);
                warn!(
                    "{label} attempt {retry} failed: {e}. Retrying after {}ms...",
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
