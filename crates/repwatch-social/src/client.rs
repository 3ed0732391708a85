//! HTTP client for the social-content search API.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::SocialError;
use crate::retry::retry_with_backoff;
use crate::types::{parse_content, DataEnvelope, Platform, SearchJob, SocialContent};

const SEARCH_PATH: [&str; 4] = ["social", "creators", "contents", "search"];

/// Client for the social-content API.
///
/// Authenticates every request with HTTP basic auth built from the client id
/// and secret. Reads (directory, job status, fetch) are retried on transient
/// failures; job creation is sent exactly once.
pub struct SocialClient {
    client: Client,
    base_url: Url,
    client_id: String,
    client_secret: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl SocialClient {
    /// Creates a client rooted at `base_url` (e.g. `https://api.example.com/v1`).
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SocialError::InvalidUrl`] if `base_url`
    /// does not parse or cannot carry path segments.
    pub fn new(
        base_url: &str,
        client_id: &str,
        client_secret: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SocialError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let parsed = Url::parse(base_url).map_err(|e| SocialError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(SocialError::InvalidUrl {
                url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
            max_retries: 2,
            backoff_base_ms: 1_000,
        })
    }

    /// Overrides the retry policy used for idempotent reads.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Lists the platform directory.
    ///
    /// Entries that do not match the platform shape are skipped.
    ///
    /// # Errors
    ///
    /// Returns a [`SocialError`] on non-2xx status, network failure or a body
    /// without a `data` array.
    pub async fn list_platforms(&self) -> Result<Vec<Platform>, SocialError> {
        let url = self.endpoint(&["work-platforms"]);
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let envelope: DataEnvelope = self
                    .send_json(self.client.get(url.clone()), &url, "platform directory")
                    .await?;
                let received = envelope.data.len();
                let platforms: Vec<Platform> = envelope
                    .data
                    .into_iter()
                    .filter_map(|v| serde_json::from_value(v).ok())
                    .collect();
                if platforms.len() < received {
                    tracing::debug!(
                        received,
                        kept = platforms.len(),
                        "skipped malformed platform entries"
                    );
                }
                Ok(platforms)
            }
        })
        .await
    }

    /// Starts a search job for `keyword` on one platform.
    ///
    /// Not retried: a create that failed in flight may still have started a job.
    ///
    /// # Errors
    ///
    /// Returns a [`SocialError`] on non-2xx status, network failure or a
    /// response that is not a job resource.
    pub async fn create_search_job(
        &self,
        platform_id: &str,
        keyword: &str,
    ) -> Result<SearchJob, SocialError> {
        let url = self.endpoint(&SEARCH_PATH);
        let body = json!({ "work_platform_id": platform_id, "keyword": keyword });
        let job: SearchJob = self
            .send_json(
                self.client.post(url.clone()).json(&body),
                &url,
                &format!("search job creation for '{keyword}'"),
            )
            .await?;
        tracing::debug!(
            job_id = %job.id,
            platform_id,
            keyword,
            status = ?job.status,
            "search job created"
        );
        Ok(job)
    }

    /// Reads the current state of a search job.
    ///
    /// # Errors
    ///
    /// Returns a [`SocialError`] on non-2xx status, network failure or a
    /// response that is not a job resource.
    pub async fn get_search_job(&self, job_id: &str) -> Result<SearchJob, SocialError> {
        let url = self.job_endpoint(job_id, None);
        let context = format!("search job {job_id}");
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            let context = context.clone();
            async move {
                self.send_json(self.client.get(url.clone()), &url, &context)
                    .await
            }
        })
        .await
    }

    /// Fetches the content collected by a finished search job.
    ///
    /// Items without a link are skipped.
    ///
    /// # Errors
    ///
    /// Returns a [`SocialError`] on non-2xx status, network failure or a body
    /// without a `data` array.
    pub async fn fetch_search_results(
        &self,
        job_id: &str,
    ) -> Result<Vec<SocialContent>, SocialError> {
        let url = self.job_endpoint(job_id, Some("fetch"));
        let context = format!("results of search job {job_id}");
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            let context = context.clone();
            async move {
                let envelope: DataEnvelope = self
                    .send_json(self.client.get(url.clone()), &url, &context)
                    .await?;
                let received = envelope.data.len();
                let content: Vec<SocialContent> =
                    envelope.data.into_iter().filter_map(parse_content).collect();
                if content.len() < received {
                    tracing::debug!(
                        job_id,
                        received,
                        kept = content.len(),
                        "skipped unusable social content items"
                    );
                }
                Ok(content)
            }
        })
        .await
    }

    /// Sends an authenticated request and decodes a 2xx JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
        context: &str,
    ) -> Result<T, SocialError> {
        let response = request
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, url, response.headers()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SocialError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Appends path segments (percent-encoded) to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn job_endpoint(&self, job_id: &str, action: Option<&str>) -> Url {
        let mut segments: Vec<&str> = SEARCH_PATH.to_vec();
        segments.push(job_id);
        segments.extend(action);
        self.endpoint(&segments)
    }
}

/// Maps a non-2xx status to a typed error.
fn status_error(
    status: StatusCode,
    url: &Url,
    headers: &reqwest::header::HeaderMap,
) -> SocialError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => SocialError::RateLimited {
            retry_after_secs: headers
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60),
        },
        StatusCode::UNAUTHORIZED => SocialError::Unauthorized,
        StatusCode::FORBIDDEN => SocialError::Forbidden,
        StatusCode::NOT_FOUND => SocialError::NotFound {
            url: url.to_string(),
        },
        other => SocialError::UnexpectedStatus {
            status: other.as_u16(),
            url: url.to_string(),
        },
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
