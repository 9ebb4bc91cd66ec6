//! Bounded retry with a fixed delay and a per-attempt timeout.
//!
//! Used once at startup to acquire the database pool; steady-state code never retries.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::{sleep, timeout};
use tracing::{info, warn};

/// Failure of a single attempt.
#[derive(Debug, Error)]
pub enum AttemptError<E>
where
    E: std::error::Error + 'static,
{
    #[error("attempt timed out after {0:?}")]
    TimedOut(Duration),
    #[error(transparent)]
    Failed(E),
}

/// Every attempt failed; carries the last failure.
#[derive(Debug, Error)]
#[error("gave up after {attempts} attempts: {last}")]
pub struct RetryExhausted<E>
where
    E: std::error::Error + 'static,
{
    pub attempts: u32,
    #[source]
    pub last: AttemptError<E>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
    attempt_timeout: Duration,
}

impl RetryPolicy {
    /// Fixed-delay policy. `max_attempts` is clamped to at least one.
    pub const fn fixed(max_attempts: u32, delay: Duration, attempt_timeout: Duration) -> Self {
        let max_attempts = if max_attempts == 0 { 1 } else { max_attempts };
        Self { max_attempts, delay, attempt_timeout }
    }

    /// Startup policy for the database pool: 5 attempts, 5s each, 2s apart.
    pub const fn database_default() -> Self {
        Self::fixed(5, Duration::from_secs(2), Duration::from_secs(5))
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn attempt_timeout(&self) -> Duration {
        self.attempt_timeout
    }

    /// Run `operation` until it succeeds or the attempts are used up.
    ///
    /// There is no sleep after the final attempt.
    pub async fn run<F, Fut, T, E>(&self, operation_name: &str, mut operation: F) -> Result<T, RetryExhausted<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::error::Error + 'static,
    {
        let mut attempt = 1;
        loop {
            let failure = match timeout(self.attempt_timeout, operation()).await {
                Ok(Ok(value)) => {
                    if attempt > 1 {
                        info!(operation = operation_name, attempt, "operation succeeded after retry");
                    }
                    return Ok(value);
                }
                Ok(Err(e)) => AttemptError::Failed(e),
                Err(_) => AttemptError::TimedOut(self.attempt_timeout),
            };

            warn!(
                operation = operation_name,
                attempt,
                max_attempts = self.max_attempts,
                error = %failure,
                "attempt failed"
            );

            if attempt >= self.max_attempts {
                return Err(RetryExhausted { attempts: attempt, last: failure });
            }
            sleep(self.delay).await;
            attempt += 1;
        }
    }
}
