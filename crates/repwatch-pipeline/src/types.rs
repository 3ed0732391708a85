//! Results produced by the pipeline.

use chrono::{DateTime, Utc};
use repwatch_news::NewsData;
use repwatch_social::SocialContent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialStatus {
    Success,
    Failed,
    TimedOut,
    Error,
    Skipped,
}

/// Social payload of a keyword's collection result.
///
/// The social step never fails a keyword: every outcome, including an
/// unconfigured platform, is represented here with an empty `content` list
/// and a `message` when nothing was collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialData {
    pub status: SocialStatus,
    pub content: Vec<SocialContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SocialData {
    #[must_use]
    pub fn success(platform: &str, content: Vec<SocialContent>) -> Self {
        Self {
            status: SocialStatus::Success,
            content,
            platform: Some(platform.to_owned()),
            message: None,
        }
    }

    #[must_use]
    pub fn unsuccessful(status: SocialStatus, platform: Option<&str>, message: String) -> Self {
        Self {
            status,
            content: Vec::new(),
            platform: platform.map(str::to_owned),
            message: Some(message),
        }
    }

    #[must_use]
    pub fn skipped(message: &str) -> Self {
        Self::unsuccessful(SocialStatus::Skipped, None, message.to_owned())
    }
}

/// One keyword's outcome for one collection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResult {
    pub keyword: String,
    pub news_data: NewsData,
    pub social_data: SocialData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_search_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// Set when the keyword failed as a whole (the news step failed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CollectionResult {
    /// Placeholder for a keyword whose collection failed.
    #[must_use]
    pub fn failed(keyword: &str, message: String) -> Self {
        Self {
            keyword: keyword.to_owned(),
            news_data: NewsData::error(message.clone()),
            social_data: SocialData::skipped(
                "Social search not attempted because the news fetch failed",
            ),
            social_search_id: None,
            timestamp: Utc::now(),
            error: Some(message),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Per-platform result of a listening run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlatformResult {
    Success { content: Vec<SocialContent> },
    Failure { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformOutcome {
    pub platform_id: String,
    pub platform: String,
    pub result: PlatformResult,
}

/// Successful platform in the split report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformContent {
    pub platform: String,
    pub platform_id: String,
    pub data: Vec<SocialContent>,
}

/// Failed platform in the split report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformFailure {
    pub platform: String,
    pub platform_id: String,
    pub error: String,
}

/// Outcome of searching one keyword across every eligible platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListeningReport {
    pub keyword: String,
    pub outcomes: Vec<PlatformOutcome>,
    pub timestamp: DateTime<Utc>,
}

impl ListeningReport {
    /// Splits outcomes into successes and failures, each in platform order.
    #[must_use]
    pub fn into_parts(self) -> (Vec<PlatformContent>, Vec<PlatformFailure>) {
        let mut results = Vec::new();
        let mut errors = Vec::new();
        for outcome in self.outcomes {
            match outcome.result {
                PlatformResult::Success { content } => results.push(PlatformContent {
                    platform: outcome.platform,
                    platform_id: outcome.platform_id,
                    data: content,
                }),
                PlatformResult::Failure { error } => errors.push(PlatformFailure {
                    platform: outcome.platform,
                    platform_id: outcome.platform_id,
                    error,
                }),
            }
        }
        (results, errors)
    }

    #[must_use]
    pub fn success_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, PlatformResult::Success { .. }))
            .count()
    }
}
