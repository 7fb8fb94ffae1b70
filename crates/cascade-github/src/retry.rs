//! Bounded retry for transient gateway failures.
//!
//! Timeouts, connection errors, 5xx responses, and rate limiting are retried
//! with exponential backoff. Everything else returns on the first failure.
//! Mutations are safe to repeat because setting an option is idempotent on
//! the store side.

use std::future::Future;
use std::time::Duration;

use crate::error::GatewayError;

/// Retry behaviour for one gateway call.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Maximum delay between retries (backoff and `Retry-After` are capped here).
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn with_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    /// Every call is attempted exactly once.
    #[must_use]
    pub fn none() -> Self {
        Self::with_attempts(1)
    }

    fn delay_for(&self, error: &GatewayError, backoff: Duration) -> Duration {
        match error {
            GatewayError::RateLimited { retry_after_secs } => {
                Duration::from_secs(*retry_after_secs).min(self.max_delay)
            }
            _ => backoff.min(self.max_delay),
        }
    }

    /// Run `call` until it succeeds, fails permanently, or attempts run out.
    ///
    /// # Errors
    ///
    /// Returns the last [`GatewayError`] produced by `call`.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T, GatewayError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, GatewayError>>,
    {
        let mut backoff = self.base_delay;
        let mut attempt = 1;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_transient() && attempt < self.max_attempts => {
                    let delay = self.delay_for(&error, backoff);
                    tracing::warn!(
                        operation,
                        attempt,
                        max_attempts = self.max_attempts,
                        ?delay,
                        %error,
                        "transient gateway failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    backoff = backoff.saturating_mul(2);
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
