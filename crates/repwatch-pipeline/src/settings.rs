//! Runtime knobs for the collection pipeline.

use std::time::Duration;

use repwatch_core::AppConfig;

/// Attempt budget and fixed interval for polling a search job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Number of status checks after the job was created.
    pub max_attempts: u32,
    /// Sleep before each status check.
    pub interval: Duration,
}

impl PollPolicy {
    #[must_use]
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }

    /// Keyword collection: 3 checks, 5 s apart.
    #[must_use]
    pub fn collect_default() -> Self {
        Self::new(3, Duration::from_secs(5))
    }

    /// Multi-platform listening: 15 checks, 3 s apart.
    #[must_use]
    pub fn listen_default() -> Self {
        Self::new(15, Duration::from_secs(3))
    }

    /// Upper bound on time spent sleeping between checks.
    #[must_use]
    pub fn max_wait(&self) -> Duration {
        self.interval.saturating_mul(self.max_attempts)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Platform used for a keyword's social search; `None` skips that step.
    pub social_platform_id: Option<String>,
    pub collect_poll: PollPolicy,
    pub listen_poll: PollPolicy,
    /// Pause before each platform after the first during listening.
    pub inter_platform_delay: Duration,
    /// Keywords collected at once. Results keep input order regardless.
    pub max_concurrent_keywords: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            social_platform_id: None,
            collect_poll: PollPolicy::collect_default(),
            listen_poll: PollPolicy::listen_default(),
            inter_platform_delay: Duration::from_secs(2),
            max_concurrent_keywords: 1,
        }
    }
}

impl PipelineSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            social_platform_id: config.social_platform_id.clone(),
            collect_poll: PollPolicy::new(
                config.collect_poll_attempts,
                Duration::from_millis(config.collect_poll_interval_ms),
            ),
            listen_poll: PollPolicy::new(
                config.listen_poll_attempts,
                Duration::from_millis(config.listen_poll_interval_ms),
            ),
            inter_platform_delay: Duration::from_millis(config.inter_platform_delay_ms),
            max_concurrent_keywords: config.max_concurrent_keywords.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_poll_budgets_differ_per_call_site() {
        let settings = PipelineSettings::default();
        assert_eq!(settings.collect_poll.max_attempts, 3);
        assert_eq!(settings.collect_poll.interval, Duration::from_secs(5));
        assert_eq!(settings.listen_poll.max_attempts, 15);
        assert_eq!(settings.listen_poll.interval, Duration::from_secs(3));
        assert_eq!(settings.max_concurrent_keywords, 1);
    }

    #[test]
    fn from_config_maps_millisecond_fields() {
        let config = AppConfig {
            env: repwatch_core::Environment::Test,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "info".to_owned(),
            news_api_url: "https://news.example.com".to_owned(),
            news_api_key: "k".to_owned(),
            news_page_size: 20,
            social_api_url: "https://social.example.com/v1".to_owned(),
            social_client_id: "id".to_owned(),
            social_client_secret: "secret".to_owned(),
            social_platform_id: Some("p1".to_owned()),
            http_timeout_secs: 30,
            http_user_agent: "ua".to_owned(),
            http_max_retries: 2,
            http_retry_backoff_base_ms: 1000,
            collect_poll_attempts: 4,
            collect_poll_interval_ms: 250,
            listen_poll_attempts: 9,
            listen_poll_interval_ms: 1500,
            inter_platform_delay_ms: 0,
            max_concurrent_keywords: 0,
            tracked_keywords: vec![],
            collect_cron: None,
        };
        let settings = PipelineSettings::from_config(&config);
        assert_eq!(settings.social_platform_id.as_deref(), Some("p1"));
        assert_eq!(
            settings.collect_poll,
            PollPolicy::new(4, Duration::from_millis(250))
        );
        assert_eq!(
            settings.listen_poll,
            PollPolicy::new(9, Duration::from_millis(1500))
        );
        assert_eq!(settings.inter_platform_delay, Duration::ZERO);
        assert_eq!(settings.max_concurrent_keywords, 1);
    }

    #[test]
    fn max_wait_is_attempts_times_interval() {
        assert_eq!(
            PollPolicy::listen_default().max_wait(),
            Duration::from_secs(45)
        );
        assert_eq!(
            PollPolicy::new(0, Duration::from_secs(5)).max_wait(),
            Duration::ZERO
        );
    }
}
