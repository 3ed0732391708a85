//! Social-content API resource types.
//!
//! The job and platform resources are small and stable, so they deserialize
//! directly. Content items are loosely shaped and go through a private
//! `RawContent` first; items that cannot be used are dropped individually.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Remote status of a search job.
///
/// Status strings this client does not know are read as [`JobStatus::Unknown`]
/// and treated by pollers as "not finished yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    InProgress,
    Success,
    Failed,
    #[serde(other)]
    Unknown,
}

/// Asynchronous search job resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchJob {
    pub id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default, deserialize_with = "platform_ref_or_id")]
    pub work_platform: Option<PlatformRef>,
    /// Server-supplied failure detail; a string or an object with a message.
    #[serde(default)]
    pub error: Option<Value>,
}

impl SearchJob {
    /// Human-readable form of the server's `error` field, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Object(map) => ["message", "description", "error_code", "code"]
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_str))
                .map(str::to_owned),
            _ => None,
        }
    }
}

/// Platform reference embedded in jobs and content items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Jobs reference their platform either by bare id or as an object.
fn platform_ref_or_id<'de, D>(deserializer: D) -> Result<Option<PlatformRef>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(id)) => Some(PlatformRef {
            id: Some(id),
            name: None,
        }),
        Some(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlatformCategory {
    Social,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlatformStatus {
    Active,
    #[serde(other)]
    Inactive,
}

/// Entry of the platform directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub id: String,
    pub name: String,
    pub category: PlatformCategory,
    pub status: PlatformStatus,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl Platform {
    /// Only active social platforms take part in keyword searches.
    #[must_use]
    pub fn is_searchable(&self) -> bool {
        self.category == PlatformCategory::Social && self.status == PlatformStatus::Active
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEngagement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_count: Option<u64>,
}

/// One post returned by a finished search job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_platform: Option<PlatformRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ContentProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default)]
    pub engagement: ContentEngagement,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub mentions: Vec<String>,
}

// ---------------------------------------------------------------------------
// Wire envelopes
// ---------------------------------------------------------------------------

/// `{ "data": [...] }` list envelope shared by the directory and fetch calls.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope {
    pub data: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawContent {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    work_platform: Option<PlatformRef>,
    #[serde(default)]
    profile: Option<ContentProfile>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    media_url: Option<String>,
    #[serde(default)]
    thumbnail_url: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    engagement: Option<ContentEngagement>,
    #[serde(default)]
    hashtags: Option<Vec<Value>>,
    #[serde(default)]
    mentions: Option<Vec<Value>>,
}

/// Converts one fetched item into [`SocialContent`]; items without a URL are
/// not linkable from the dashboard and are dropped.
pub(crate) fn parse_content(value: Value) -> Option<SocialContent> {
    let raw: RawContent = serde_json::from_value(value).ok()?;
    let url = raw.url.filter(|u| !u.trim().is_empty())?;

    Some(SocialContent {
        id: raw.id,
        work_platform: raw.work_platform,
        profile: raw.profile,
        title: raw.title,
        description: raw.description,
        url,
        media_url: raw.media_url,
        thumbnail_url: raw.thumbnail_url,
        published_at: raw.published_at,
        engagement: raw.engagement.unwrap_or_default(),
        hashtags: tag_list(raw.hashtags),
        mentions: tag_list(raw.mentions),
    })
}

/// Hashtags and mentions arrive as plain strings or as `{ "name": .. }`.
fn tag_list(values: Option<Vec<Value>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s),
            Value::Object(map) => map.get("name").and_then(Value::as_str).map(str::to_owned),
            _ => None,
        })
        .collect()
}
