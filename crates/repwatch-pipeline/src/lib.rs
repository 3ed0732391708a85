//! Multi-keyword, multi-source collection pipeline.
//!
//! For every keyword a run fetches news once and runs one social search job;
//! listening runs the same job across every active social platform. Failures
//! are isolated per keyword and per platform and reported as messages inside
//! the results.

pub mod error;
pub mod job;
pub mod settings;
pub mod types;

mod classify;
mod collector;
mod listening;

use repwatch_core::AppConfig;
use repwatch_news::NewsClient;
use repwatch_social::SocialClient;

pub use error::PipelineError;
pub use job::{run_search_job, JobError, JobOutcome};
pub use settings::{PipelineSettings, PollPolicy};
pub use types::{
    CollectionResult, ListeningReport, PlatformContent, PlatformFailure, PlatformOutcome,
    PlatformResult, SocialData, SocialStatus,
};

/// Shared entry point for the CLI, the HTTP API and the scheduler.
pub struct Pipeline {
    news: NewsClient,
    social: SocialClient,
    settings: PipelineSettings,
}

impl Pipeline {
    #[must_use]
    pub fn new(news: NewsClient, social: SocialClient, settings: PipelineSettings) -> Self {
        Self {
            news,
            social,
            settings,
        }
    }

    /// Builds both API clients and the settings from application config.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::NewsClient`] or [`PipelineError::SocialClient`]
    /// if a configured URL is invalid or an HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, PipelineError> {
        let news = NewsClient::new(
            &config.news_api_url,
            &config.news_api_key,
            config.http_timeout_secs,
            &config.http_user_agent,
        )
        .map_err(PipelineError::NewsClient)?
        .with_page_size(config.news_page_size);

        let social = SocialClient::new(
            &config.social_api_url,
            &config.social_client_id,
            &config.social_client_secret,
            config.http_timeout_secs,
            &config.http_user_agent,
        )
        .map_err(PipelineError::SocialClient)?
        .with_retry(config.http_max_retries, config.http_retry_backoff_base_ms);

        Ok(Self::new(news, social, PipelineSettings::from_config(config)))
    }

    #[must_use]
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }
}
