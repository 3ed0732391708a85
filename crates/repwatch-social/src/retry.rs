//! Retry with exponential back-off and jitter for idempotent social API reads.
//!
//! Job creation is never routed through here: a create that timed out may
//! still have started a job upstream, and a second create would start another.

use std::future::Future;
use std::time::Duration;

use crate::error::SocialError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - [`SocialError::RateLimited`] (HTTP 429).
/// - Network-level failures: timeout, connection refused/reset.
/// - HTTP 5xx responses.
///
/// **Not retriable:** auth failures, 404, other 4xx, malformed bodies.
pub(crate) fn is_retriable(err: &SocialError) -> bool {
    match err {
        SocialError::RateLimited { .. } => true,
        SocialError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        SocialError::UnexpectedStatus { status, .. } => *status >= 500,
        SocialError::Unauthorized
        | SocialError::Forbidden
        | SocialError::NotFound { .. }
        | SocialError::Deserialize { .. }
        | SocialError::InvalidUrl { .. } => false,
    }
}

/// Upper bound for any single sleep between attempts.
const MAX_DELAY_MS: u64 = 30_000;

/// Sleep before retry number `attempt` (1-based).
///
/// Exponential from `backoff_base_ms`, scaled by `jitter` (expected in
/// `0.75..=1.25`). A 429 never waits less than the server's `Retry-After`.
/// Either way the result is capped at [`MAX_DELAY_MS`].
fn retry_delay_ms(attempt: u32, backoff_base_ms: u64, err: &SocialError, jitter: f64) -> u64 {
    let exponential = backoff_base_ms
        .saturating_mul(1u64 << attempt.saturating_sub(1).min(10))
        .min(MAX_DELAY_MS);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered = (exponential as f64 * jitter) as u64;
    let floor = match err {
        SocialError::RateLimited { retry_after_secs } => retry_after_secs.saturating_mul(1_000),
        _ => 0,
    };
    jittered.max(floor).min(MAX_DELAY_MS)
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// With `backoff_base_ms = 1_000` the sleeps are roughly 1 s, 2 s, 4 s, each
/// ±25 % jitter. After a 429 the sleep is at least the `Retry-After` the
/// server sent. No sleep exceeds 30 s. Non-retriable errors are returned
/// immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, SocialError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SocialError>>,
{
    let mut attempt = 0u32;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !is_retriable(&err) || attempt >= max_retries => return Err(err),
            Err(err) => err,
        };
        attempt += 1;
        let jitter = rand::random::<f64>() * 0.5 + 0.75;
        let delay_ms = retry_delay_ms(attempt, backoff_base_ms, &err, jitter);
        tracing::warn!(
            attempt,
            max_retries,
            delay_ms,
            error = %err,
            "social API transient error, retrying"
        );
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn rate_limited_is_retriable() {
        assert!(is_retriable(&SocialError::RateLimited {
            retry_after_secs: 1
        }));
    }

    #[test]
    fn server_errors_are_retriable_client_errors_are_not() {
        assert!(is_retriable(&SocialError::UnexpectedStatus {
            status: 503,
            url: "http://x".to_owned()
        }));
        assert!(!is_retriable(&SocialError::UnexpectedStatus {
            status: 422,
            url: "http://x".to_owned()
        }));
    }

    #[test]
    fn auth_and_not_found_are_not_retriable() {
        assert!(!is_retriable(&SocialError::Unauthorized));
        assert!(!is_retriable(&SocialError::Forbidden));
        assert!(!is_retriable(&SocialError::NotFound {
            url: "http://x".to_owned()
        }));
    }

    #[test]
    fn delay_grows_exponentially_and_is_capped() {
        let err = SocialError::UnexpectedStatus {
            status: 503,
            url: "http://x".to_owned(),
        };
        assert_eq!(retry_delay_ms(1, 1_000, &err, 1.0), 1_000);
        assert_eq!(retry_delay_ms(3, 1_000, &err, 1.0), 4_000);
        assert_eq!(retry_delay_ms(2, 1_000, &err, 0.75), 1_500);
        assert_eq!(retry_delay_ms(9, 1_000, &err, 1.25), MAX_DELAY_MS);
    }

    #[test]
    fn rate_limit_waits_at_least_retry_after() {
        let err = SocialError::RateLimited {
            retry_after_secs: 5,
        };
        assert_eq!(retry_delay_ms(1, 10, &err, 0.75), 5_000);
        // Back-off already longer than Retry-After wins.
        assert_eq!(retry_delay_ms(4, 1_000, &err, 1.0), 8_000);
    }

    #[test]
    fn retry_after_is_capped() {
        let err = SocialError::RateLimited {
            retry_after_secs: 3_600,
        };
        assert_eq!(retry_delay_ms(1, 10, &err, 1.0), MAX_DELAY_MS);
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, SocialError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_rate_limited_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                let n = c.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(SocialError::RateLimited {
                        retry_after_secs: 0,
                    })
                } else {
                    Ok::<u32, SocialError>(7)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn returns_last_error_after_exhausting_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(2, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(SocialError::RateLimited {
                    retry_after_secs: 0,
                })
            }
        })
        .await;
        // max_retries=2 → 3 total attempts
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(SocialError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn does_not_retry_forbidden() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(SocialError::Forbidden)
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(SocialError::Forbidden)));
    }
}
