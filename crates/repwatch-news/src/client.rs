//! HTTP client for the news-search API.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::error::NewsError;
use crate::types::{parse_article, NewsData, RawErrorEnvelope, RawSearchResponse};

const DEFAULT_PAGE_SIZE: u32 = 20;

/// Client for a keyword news-search endpoint.
///
/// Each search is a single GET filtered by title, limited to one page and
/// sorted newest first. The API key travels in the `X-API-Key` header so it
/// never appears in a request URL that might be logged.
pub struct NewsClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    page_size: u32,
}

impl NewsClient {
    /// Creates a client for `endpoint` (the full search URL, without query).
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`NewsError::InvalidUrl`] if `endpoint`
    /// does not parse.
    pub fn new(
        endpoint: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let endpoint = Url::parse(endpoint).map_err(|e| NewsError::InvalidUrl {
            url: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Sets the number of articles requested per keyword.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Searches for recent articles whose title mentions `keyword`.
    ///
    /// Entries that are not usable articles (no title or link) are skipped.
    ///
    /// # Errors
    ///
    /// - [`NewsError::RateLimited`], [`NewsError::Unauthorized`],
    ///   [`NewsError::Forbidden`], [`NewsError::NotFound`] or
    ///   [`NewsError::UnexpectedStatus`] for non-2xx responses.
    /// - [`NewsError::Api`] if a 2xx body reports an error status.
    /// - [`NewsError::Deserialize`] if the body has no `results` array.
    /// - [`NewsError::Http`] on network failure.
    pub async fn search(&self, keyword: &str) -> Result<NewsData, NewsError> {
        let url = self.search_url(keyword);
        let response = self
            .client
            .get(url.clone())
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, &url, response.headers()));
        }

        let body = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| NewsError::Deserialize {
                context: format!("news search for '{keyword}'"),
                source: e,
            })?;

        if let Ok(envelope) = serde_json::from_value::<RawErrorEnvelope>(value.clone()) {
            if let Some(message) = envelope.failure_message() {
                return Err(NewsError::Api(message));
            }
        }

        let raw: RawSearchResponse =
            serde_json::from_value(value).map_err(|e| NewsError::Deserialize {
                context: format!("news search for '{keyword}'"),
                source: e,
            })?;

        let received = raw.results.len();
        let articles: Vec<_> = raw.results.into_iter().filter_map(parse_article).collect();
        if articles.len() < received {
            tracing::debug!(
                keyword,
                received,
                kept = articles.len(),
                "skipped malformed news entries"
            );
        }

        Ok(NewsData::ok(articles, raw.total_results))
    }

    /// Builds the search URL with percent-encoded query parameters.
    fn search_url(&self, keyword: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("title", keyword)
            .append_pair("per_page", &self.page_size.to_string())
            .append_pair("sort.by", "published_at")
            .append_pair("sort.order", "desc");
        url
    }
}

/// Maps a non-2xx status to a typed error.
fn status_error(status: StatusCode, url: &Url, headers: &reqwest::header::HeaderMap) -> NewsError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => NewsError::RateLimited {
            retry_after_secs: headers
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60),
        },
        StatusCode::UNAUTHORIZED => NewsError::Unauthorized,
        StatusCode::FORBIDDEN => NewsError::Forbidden,
        StatusCode::NOT_FOUND => NewsError::NotFound {
            url: url.to_string(),
        },
        other => NewsError::UnexpectedStatus {
            status: other.as_u16(),
        },
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
