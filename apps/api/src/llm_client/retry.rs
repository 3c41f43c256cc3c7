//! Retry policy for outbound model calls.
//!
//! The policy is plain data; `call_with_policy` drives any async operation with it,
//! so backoff behaviour can be tested without a network.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub base_delay: Duration,
    /// HTTP statuses worth another attempt (rate limiting, provider overload).
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
            retryable_statuses: vec![429, 503],
        }
    }
}

impl RetryPolicy {
    /// Wait before the attempt following `attempt` (0-based): base, 2x base, 4x base, ...
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2_u32.saturating_pow(attempt))
    }

    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }
}

/// Runs `op` until it produces an outcome `should_retry` rejects, or attempts run out.
/// On exhaustion the last outcome is returned as-is.
pub async fn call_with_policy<T, E, F, Fut, R>(
    policy: &RetryPolicy,
    mut op: F,
    should_retry: R,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&Result<T, E>) -> bool,
{
    let mut attempt = 0;
    loop {
        let outcome = op(attempt).await;
        if attempt + 1 >= policy.max_attempts || !should_retry(&outcome) {
            return outcome;
        }

        let delay = policy.delay_for(attempt);
        warn!(
            "Model call attempt {}/{} failed, retrying after {}ms...",
            attempt + 1,
            policy.max_attempts,
            delay.as_millis()
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
