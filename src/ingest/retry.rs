//! Retry policy for whole ingestion attempts

use crate::config::RetrySettings;
use crate::error::{IngestionError, IngestionErrorKind};
use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Fixed-delay retry policy
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Wait between attempts
    pub delay: Duration,
    /// Error kinds that allow another attempt
    pub retry_on: HashSet<IngestionErrorKind>,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            retry_on: RetrySettings::default().retry_on.into_iter().collect(),
        }
    }

    pub fn from_settings(settings: &RetrySettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            delay: settings.delay(),
            retry_on: settings.retry_on.iter().copied().collect(),
        }
    }

    /// Single attempt, no retries
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Restrict retries to the given error kinds
    pub fn retry_on(mut self, kinds: impl IntoIterator<Item = IngestionErrorKind>) -> Self {
        self.retry_on = kinds.into_iter().collect();
        self
    }

    pub fn is_retryable(&self, err: &IngestionError) -> bool {
        self.retry_on.contains(&err.kind())
    }

    /// Run `op` until it succeeds, hits a non-retryable error, or attempts
    /// run out. `op` receives the 1-based attempt number.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, IngestionError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, IngestionError>>,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => {
                    if attempt > 1 {
                        info!(attempt, "Ingestion succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) if !self.is_retryable(&e) => {
                    debug!(error = %e, kind = ?e.kind(), "Non-retryable error encountered");
                    return Err(e);
                }
                Err(e) if attempt >= self.max_attempts => {
                    error!(attempts = attempt, error = %e, "Ingestion failed after all attempts");
                    return Err(IngestionError::Exhausted {
                        attempts: attempt,
                        source: Box::new(e),
                    });
                }
                Err(e) => {
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = self.delay.as_millis() as u64,
                        error = %e,
                        "Ingestion attempt failed, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_settings(&RetrySettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_retries_then_succeeds() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(3, Duration::ZERO);

        let result = policy
            .run(|attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt < 2 {
                        Err(IngestionError::network("connection reset"))
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_exhaustion_wraps_last_error() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(3, Duration::ZERO);

        let result: Result<(), _> = policy
            .run(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(IngestionError::Status(500)) }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match result {
            Err(IngestionError::Exhausted { attempts, source }) => {
                assert_eq!(attempts, 3);
                assert!(matches!(*source, IngestionError::Status(500)));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_retryable_fails_fast() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(5, Duration::ZERO);

        let result: Result<(), _> = policy
            .run(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(crate::error::StoreError::invalid("blank email").into()) }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(IngestionError::Store(_))));
    }

    #[tokio::test]
    async fn test_retry_on_is_configurable() {
        let policy = RetryPolicy::new(3, Duration::ZERO).retry_on([IngestionErrorKind::Network]);
        assert!(policy.is_retryable(&IngestionError::network("x")));
        assert!(!policy.is_retryable(&IngestionError::Status(500)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_fixed_delay_between_attempts() {
        let policy = RetryPolicy::new(3, Duration::from_secs(2));
        let start = tokio::time::Instant::now();

        let _: Result<(), _> = policy
            .run(|_| async { Err(IngestionError::network("down")) })
            .await;

        assert_eq!(start.elapsed(), Duration::from_secs(4));
    }

    #[test]
    fn test_zero_attempts_means_one() {
        let policy = RetryPolicy::new(0, Duration::ZERO);
        assert_eq!(policy.max_attempts, 1);
    }
}
