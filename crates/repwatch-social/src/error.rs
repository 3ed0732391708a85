use thiserror::Error;

/// Errors returned by [`crate::SocialClient`].
#[derive(Debug, Error)]
pub enum SocialError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by social API (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("social API rejected the credentials (HTTP 401)")]
    Unauthorized,

    #[error("social API denied access (HTTP 403)")]
    Forbidden,

    #[error("social endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid social API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
