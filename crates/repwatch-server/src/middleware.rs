use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::ApiError;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Axum middleware that extracts or generates a request ID.
///
/// Uses the incoming `x-request-id` header when present, otherwise a new
/// `UUIDv4`. The ID is stored as a [`RequestId`] extension and echoed on the
/// response.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

#[derive(Debug)]
struct Window {
    started_at: Instant,
    used: usize,
}

/// Fixed-window budget for routes that call the news and social APIs.
///
/// The window is global rather than per client: every pipeline request
/// spends the same provider credentials, so the provider quota is the
/// resource being protected.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    current: Arc<Mutex<Window>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            current: Arc::new(Mutex::new(Window {
                started_at: Instant::now(),
                used: 0,
            })),
        }
    }

    /// Takes one request from the current window.
    ///
    /// Returns the time left until the window resets when it is spent.
    async fn try_acquire(&self) -> Result<(), Duration> {
        let mut current = self.current.lock().await;
        let elapsed = current.started_at.elapsed();
        if elapsed >= self.window {
            current.started_at = Instant::now();
            current.used = 0;
        } else if current.used >= self.max_requests {
            return Err(self.window - elapsed);
        }
        current.used += 1;
        Ok(())
    }
}

/// Rejects pipeline requests once the window is spent, with `Retry-After`
/// set to the whole seconds left in the window.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let Err(remaining) = rate_limit.try_acquire().await else {
        return next.run(req).await;
    };

    let retry_after_secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
    tracing::warn!(
        max_requests = rate_limit.max_requests,
        retry_after_secs,
        path = %req.uri().path(),
        "pipeline rate limit reached"
    );
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();
    let mut res = ApiError::new(
        request_id,
        "rate_limited",
        format!("rate limit exceeded, retry after {retry_after_secs}s"),
    )
    .into_response();
    res.headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
    res
}
