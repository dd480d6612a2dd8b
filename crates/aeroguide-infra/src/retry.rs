//! Bounded retry with exponential backoff for upstream calls.
//!
//! Only errors [`UpstreamError::is_transient`] considers retryable are
//! retried; auth failures and malformed responses surface immediately.

use std::future::Future;
use std::time::Duration;

use aeroguide_types::error::UpstreamError;

/// Attempts after the first: the initial call plus two retries.
const MAX_RETRIES: u32 = 2;

/// Delay before the first retry; doubles each attempt.
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// Run an upstream operation, retrying transient failures.
///
/// A `RateLimited` error carrying a server-provided delay sleeps for that
/// delay instead of the backoff schedule.
pub async fn retry_with_backoff<T, F, Fut>(
    service: &'static str,
    mut operation: F,
) -> Result<T, UpstreamError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, UpstreamError>>,
{
    let mut backoff = INITIAL_BACKOFF;
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < MAX_RETRIES => {
                attempt += 1;
                let delay = match &err {
                    UpstreamError::RateLimited {
                        retry_after_ms: Some(ms),
                    } => Duration::from_millis(*ms),
                    _ => backoff,
                };
                tracing::warn!(
                    service,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "transient upstream failure, retrying"
                );
                tokio::time::sleep(delay).await;
                backoff *= 2;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn transient() -> UpstreamError {
        UpstreamError::Timeout { service: "test" }
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_needs_no_retry() {
        let calls = AtomicU32::new(0);
        let result = retry_with_backoff("test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, UpstreamError>(42) }
        })
        .await
        .unwrap();

        assert_eq!(result, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failures_retry_until_success() {
        let calls = AtomicU32::new(0);
        let result = retry_with_backoff("test", || {
            let attempt = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 2 {
                    Err(transient())
                } else {
                    Ok("recovered")
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(result, "recovered");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_are_bounded() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = retry_with_backoff("test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(transient()) }
        })
        .await;

        assert!(matches!(result, Err(UpstreamError::Timeout { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1 + MAX_RETRIES);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_errors_fail_immediately() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = retry_with_backoff("test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(UpstreamError::Auth { service: "test" }) }
        })
        .await;

        assert!(matches!(result, Err(UpstreamError::Auth { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_honors_server_delay() {
        let calls = AtomicU32::new(0);
        let started = tokio::time::Instant::now();
        let result = retry_with_backoff("test", || {
            let attempt = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Err(UpstreamError::RateLimited {
                        retry_after_ms: Some(5_000),
                    })
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert!(result.is_ok());
        assert!(started.elapsed() >= Duration::from_millis(5_000));
    }
}
