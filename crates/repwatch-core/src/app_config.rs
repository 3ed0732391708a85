use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub news_api_url: String,
    pub news_api_key: String,
    pub news_page_size: u32,
    pub social_api_url: String,
    pub social_client_id: String,
    pub social_client_secret: String,
    /// Work platform used for the single-platform search job of a keyword
    /// collection run. `None` skips the social step.
    pub social_platform_id: Option<String>,
    pub http_timeout_secs: u64,
    pub http_user_agent: String,
    pub http_max_retries: u32,
    pub http_retry_backoff_base_ms: u64,
    pub collect_poll_attempts: u32,
    pub collect_poll_interval_ms: u64,
    pub listen_poll_attempts: u32,
    pub listen_poll_interval_ms: u64,
    pub inter_platform_delay_ms: u64,
    pub max_concurrent_keywords: usize,
    pub tracked_keywords: Vec<String>,
    pub collect_cron: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("news_api_url", &self.news_api_url)
            .field("news_api_key", &"[redacted]")
            .field("news_page_size", &self.news_page_size)
            .field("social_api_url", &self.social_api_url)
            .field("social_client_id", &"[redacted]")
            .field("social_client_secret", &"[redacted]")
            .field("social_platform_id", &self.social_platform_id)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("http_user_agent", &self.http_user_agent)
            .field("http_max_retries", &self.http_max_retries)
            .field(
                "http_retry_backoff_base_ms",
                &self.http_retry_backoff_base_ms,
            )
            .field("collect_poll_attempts", &self.collect_poll_attempts)
            .field("collect_poll_interval_ms", &self.collect_poll_interval_ms)
            .field("listen_poll_attempts", &self.listen_poll_attempts)
            .field("listen_poll_interval_ms", &self.listen_poll_interval_ms)
            .field("inter_platform_delay_ms", &self.inter_platform_delay_ms)
            .field("max_concurrent_keywords", &self.max_concurrent_keywords)
            .field("tracked_keywords", &self.tracked_keywords)
            .field("collect_cron", &self.collect_cron)
            .finish()
    }
}
