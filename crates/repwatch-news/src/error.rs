use thiserror::Error;

/// Errors returned by [`crate::NewsClient`].
#[derive(Debug, Error)]
pub enum NewsError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by news API (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("news API rejected the credentials (HTTP 401)")]
    Unauthorized,

    #[error("news API denied access (HTTP 403)")]
    Forbidden,

    #[error("news endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from news API")]
    UnexpectedStatus { status: u16 },

    /// The provider answered 2xx but reported an error in the body.
    #[error("news API error: {0}")]
    Api(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid news API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
