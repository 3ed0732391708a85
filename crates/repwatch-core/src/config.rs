use crate::app_config::{AppConfig, Environment};
use crate::keywords::parse_keyword_list;
use crate::ConfigError;

const DEFAULT_NEWS_API_URL: &str = "https://api.apitube.io/v1/news/everything";
const DEFAULT_SOCIAL_API_URL: &str = "https://api.insightiq.ai/v1";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files; useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup; no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    // Attempt budgets and page sizes must be at least 1.
    let parse_nonzero_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let value = parse_u32(var, default)?;
        if value == 0 {
            return Err(invalid(var, "must be at least 1".to_string()));
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("REPWATCH_ENV", "development"))?;
    let bind_addr = parse_addr("REPWATCH_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("REPWATCH_LOG_LEVEL", "info");

    let news_api_key = require("NEWS_API_KEY")?;
    let news_api_url = or_default("REPWATCH_NEWS_API_URL", DEFAULT_NEWS_API_URL);
    let news_page_size = parse_nonzero_u32("REPWATCH_NEWS_PAGE_SIZE", "20")?;

    let social_client_id = require("SOCIAL_API_CLIENT_ID")?;
    let social_client_secret = require("SOCIAL_API_CLIENT_SECRET")?;
    let social_api_url = or_default("REPWATCH_SOCIAL_API_URL", DEFAULT_SOCIAL_API_URL);
    let social_platform_id = optional("REPWATCH_SOCIAL_PLATFORM_ID");

    let http_timeout_secs = parse_u64("REPWATCH_HTTP_TIMEOUT_SECS", "30")?;
    let http_user_agent = or_default(
        "REPWATCH_HTTP_USER_AGENT",
        "repwatch/0.1 (reputation-monitoring)",
    );
    let http_max_retries = parse_u32("REPWATCH_HTTP_MAX_RETRIES", "2")?;
    let http_retry_backoff_base_ms = parse_u64("REPWATCH_HTTP_RETRY_BACKOFF_BASE_MS", "1000")?;

    let collect_poll_attempts = parse_nonzero_u32("REPWATCH_COLLECT_POLL_ATTEMPTS", "3")?;
    let collect_poll_interval_ms = parse_u64("REPWATCH_COLLECT_POLL_INTERVAL_MS", "5000")?;
    let listen_poll_attempts = parse_nonzero_u32("REPWATCH_LISTEN_POLL_ATTEMPTS", "15")?;
    let listen_poll_interval_ms = parse_u64("REPWATCH_LISTEN_POLL_INTERVAL_MS", "3000")?;
    let inter_platform_delay_ms = parse_u64("REPWATCH_INTER_PLATFORM_DELAY_MS", "2000")?;

    let max_concurrent_keywords = parse_usize("REPWATCH_MAX_CONCURRENT_KEYWORDS", "1")?;
    if max_concurrent_keywords == 0 {
        return Err(invalid(
            "REPWATCH_MAX_CONCURRENT_KEYWORDS",
            "must be at least 1".to_string(),
        ));
    }

    let tracked_keywords = parse_keyword_list(&or_default("REPWATCH_TRACKED_KEYWORDS", ""));
    let collect_cron = optional("REPWATCH_COLLECT_CRON");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        news_api_url,
        news_api_key,
        news_page_size,
        social_api_url,
        social_client_id,
        social_client_secret,
        social_platform_id,
        http_timeout_secs,
        http_user_agent,
        http_max_retries,
        http_retry_backoff_base_ms,
        collect_poll_attempts,
        collect_poll_interval_ms,
        listen_poll_attempts,
        listen_poll_interval_ms,
        inter_platform_delay_ms,
        max_concurrent_keywords,
        tracked_keywords,
        collect_cron,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "REPWATCH_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
