//! Exponential backoff retry logic for provider calls.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use backoff::ExponentialBackoff;
use backoff::ExponentialBackoffBuilder;
use backoff::backoff::Backoff;
use tracing::warn;

/// Default: 3 total attempts, base delay 1s, doubling after each failure.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_INITIAL_DELAY_MS: u64 = 1000;
const MULTIPLIER: f64 = 2.0;

/// How many times to attempt an operation and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Wait after the first failure; doubles after every later failure.
    pub initial_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
        }
    }

    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoffBuilder::new()
            .with_initial_interval(self.initial_delay)
            .with_multiplier(MULTIPLIER)
            .with_randomization_factor(0.0)
            .with_max_interval(Duration::MAX)
            .with_max_elapsed_time(None)
            .build()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_ATTEMPTS,
            Duration::from_millis(DEFAULT_INITIAL_DELAY_MS),
        )
    }
}

/// Retry an async operation with exponential backoff.
///
/// `attempt` is called up to `policy.max_attempts` times. After failed
/// attempt `n` the task sleeps `initial_delay * 2^(n-1)` before trying
/// again. The first success is returned immediately. If the final attempt
/// fails, its error is returned as-is.
pub async fn retry_with_backoff<T, E, Fut, F>(policy: &RetryPolicy, mut attempt: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut backoff = policy.backoff();
    let mut attempts = 0;

    loop {
        attempts += 1;

        match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) if attempts >= max_attempts => return Err(e),
            Err(e) => {
                let wait = backoff.next_backoff().unwrap_or(policy.initial_delay);
                warn!(
                    attempt = attempts,
                    max_attempts,
                    delay_ms = wait.as_millis() as u64,
                    "Attempt failed: {}. Retrying",
                    e
                );
                tokio::time::sleep(wait).await;
            }
        }
    }
}
