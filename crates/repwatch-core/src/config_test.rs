use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("NEWS_API_KEY", "news-key");
    m.insert("SOCIAL_API_CLIENT_ID", "client-id");
    m.insert("SOCIAL_API_CLIENT_SECRET", "client-secret");
    m
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "REPWATCH_ENV"));
}

#[test]
fn build_app_config_fails_without_news_api_key() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "NEWS_API_KEY"),
        "expected MissingEnvVar(NEWS_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_secret_as_missing() {
    let mut map = full_env();
    map.insert("SOCIAL_API_CLIENT_SECRET", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SOCIAL_API_CLIENT_SECRET"),
        "expected MissingEnvVar(SOCIAL_API_CLIENT_SECRET), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = full_env();
    map.insert("REPWATCH_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REPWATCH_BIND_ADDR"),
        "expected InvalidEnvVar(REPWATCH_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.news_api_url, DEFAULT_NEWS_API_URL);
    assert_eq!(cfg.news_page_size, 20);
    assert_eq!(cfg.social_api_url, DEFAULT_SOCIAL_API_URL);
    assert!(cfg.social_platform_id.is_none());
    assert_eq!(cfg.http_timeout_secs, 30);
    assert_eq!(cfg.http_user_agent, "repwatch/0.1 (reputation-monitoring)");
    assert_eq!(cfg.http_max_retries, 2);
    assert_eq!(cfg.http_retry_backoff_base_ms, 1000);
    assert!(cfg.tracked_keywords.is_empty());
    assert!(cfg.collect_cron.is_none());
}

#[test]
fn poll_budgets_keep_their_separate_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.collect_poll_attempts, 3);
    assert_eq!(cfg.collect_poll_interval_ms, 5000);
    assert_eq!(cfg.listen_poll_attempts, 15);
    assert_eq!(cfg.listen_poll_interval_ms, 3000);
    assert_eq!(cfg.inter_platform_delay_ms, 2000);
    assert_eq!(cfg.max_concurrent_keywords, 1);
}

#[test]
fn poll_attempts_override() {
    let mut map = full_env();
    map.insert("REPWATCH_LISTEN_POLL_ATTEMPTS", "20");
    map.insert("REPWATCH_COLLECT_POLL_INTERVAL_MS", "250");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.listen_poll_attempts, 20);
    assert_eq!(cfg.collect_poll_interval_ms, 250);
}

#[test]
fn zero_poll_attempts_is_rejected() {
    let mut map = full_env();
    map.insert("REPWATCH_COLLECT_POLL_ATTEMPTS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REPWATCH_COLLECT_POLL_ATTEMPTS"),
        "expected InvalidEnvVar(REPWATCH_COLLECT_POLL_ATTEMPTS), got: {result:?}"
    );
}

#[test]
fn zero_keyword_concurrency_is_rejected() {
    let mut map = full_env();
    map.insert("REPWATCH_MAX_CONCURRENT_KEYWORDS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REPWATCH_MAX_CONCURRENT_KEYWORDS"),
        "expected InvalidEnvVar(REPWATCH_MAX_CONCURRENT_KEYWORDS), got: {result:?}"
    );
}

#[test]
fn inter_platform_delay_invalid() {
    let mut map = full_env();
    map.insert("REPWATCH_INTER_PLATFORM_DELAY_MS", "two seconds");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REPWATCH_INTER_PLATFORM_DELAY_MS"),
        "expected InvalidEnvVar(REPWATCH_INTER_PLATFORM_DELAY_MS), got: {result:?}"
    );
}

#[test]
fn tracked_keywords_are_parsed_and_normalized() {
    let mut map = full_env();
    map.insert("REPWATCH_TRACKED_KEYWORDS", " acme, WidgetCo ,,Acme ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.tracked_keywords, vec!["acme", "WidgetCo"]);
}

#[test]
fn optional_platform_and_cron_are_read() {
    let mut map = full_env();
    map.insert("REPWATCH_SOCIAL_PLATFORM_ID", "9bb8913b-ddd9-430b-a66a-d74d846e6c66");
    map.insert("REPWATCH_COLLECT_CRON", "0 0 */6 * * *");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.social_platform_id.as_deref(),
        Some("9bb8913b-ddd9-430b-a66a-d74d846e6c66")
    );
    assert_eq!(cfg.collect_cron.as_deref(), Some("0 0 */6 * * *"));
}

#[test]
fn debug_output_redacts_secrets() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("news-key"));
    assert!(!rendered.contains("client-secret"));
    assert!(rendered.contains("[redacted]"));
}
