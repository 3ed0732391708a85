//! Turns client errors into short, user-facing messages.
//!
//! These strings end up in `CollectionResult::error`, `SocialData::message`
//! and listening failures, so they must never contain credentials. Client
//! errors carry URLs without secrets (keys travel in headers).

use repwatch_news::NewsError;
use repwatch_social::SocialError;

pub(crate) const JOB_FAILED_WITHOUT_MESSAGE: &str = "Search job failed without an error message";
pub(crate) const PLATFORM_NOT_AVAILABLE: &str = "Platform not available or endpoint not found";

/// Message for a job still running after its poll budget was spent.
pub(crate) fn timed_out_message(attempts: u32) -> String {
    format!(
        "Search is still in progress after {attempts} status checks; results are not ready yet"
    )
}

pub(crate) fn describe_news_error(err: &NewsError) -> String {
    match err {
        NewsError::Http(e) => describe_transport(e, "news"),
        NewsError::RateLimited { retry_after_secs } => rate_limited(*retry_after_secs),
        NewsError::Unauthorized => {
            "Authentication failed: the news API rejected the configured key".to_owned()
        }
        NewsError::Forbidden => {
            "Access forbidden: the news API key lacks permission for this search".to_owned()
        }
        NewsError::NotFound { .. } => "News endpoint not found".to_owned(),
        NewsError::UnexpectedStatus { status } => format!("Unexpected HTTP status {status}"),
        NewsError::Api(message) => format!("News API error: {message}"),
        NewsError::Deserialize { context, .. } => format!("Malformed response for {context}"),
        NewsError::InvalidUrl { url, .. } => format!("Invalid news API URL: {url}"),
    }
}

pub(crate) fn describe_social_error(err: &SocialError) -> String {
    match err {
        SocialError::Http(e) => describe_transport(e, "social"),
        SocialError::RateLimited { retry_after_secs } => rate_limited(*retry_after_secs),
        SocialError::Unauthorized => {
            "Authentication failed: check the social API client id and secret".to_owned()
        }
        SocialError::Forbidden => {
            "Access forbidden: the social API account lacks permission for this platform"
                .to_owned()
        }
        SocialError::NotFound { .. } => PLATFORM_NOT_AVAILABLE.to_owned(),
        SocialError::UnexpectedStatus { status, .. } => format!("Unexpected HTTP status {status}"),
        SocialError::Deserialize { context, .. } => format!("Malformed response for {context}"),
        SocialError::InvalidUrl { url, .. } => format!("Invalid social API URL: {url}"),
    }
}

fn rate_limited(retry_after_secs: u64) -> String {
    format!("Rate limit exceeded, retry after {retry_after_secs}s")
}

fn describe_transport(err: &reqwest::Error, api: &str) -> String {
    if err.is_timeout() {
        format!("Request to the {api} API timed out")
    } else if err.is_connect() {
        format!("Could not connect to the {api} API")
    } else if err.is_decode() || err.is_body() {
        format!("Malformed response from the {api} API")
    } else {
        format!("Network error talking to the {api} API: {err}")
    }
}
