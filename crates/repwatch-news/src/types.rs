//! News-search response types.
//!
//! The provider's payload is loosely shaped (optional fields, alternate key
//! names, objects where strings are expected), so it is read into private
//! `Raw*` structs and converted into the public, validated types here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsStatus {
    Ok,
    Error,
}

/// News payload attached to a keyword's collection result.
///
/// On failure the fallback shape is `{ "status": "error", "results": [] }`
/// plus a `message`, so consumers can always treat it as "no articles".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsData {
    pub status: NewsStatus,
    pub results: Vec<NewsArticle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NewsData {
    #[must_use]
    pub fn ok(results: Vec<NewsArticle>, total_results: Option<u64>) -> Self {
        Self {
            status: NewsStatus::Ok,
            results,
            total_results,
            message: None,
        }
    }

    /// Fallback used when the news step for a keyword failed.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: NewsStatus::Error,
            results: Vec::new(),
            total_results: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ArticleSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<ArticleSentiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<u32>,
    #[serde(default)]
    pub is_breaking: bool,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement: Option<ArticleEngagement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Overall article sentiment as scored by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSentiment {
    pub score: f64,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleEngagement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares: Option<u64>,
}

// ---------------------------------------------------------------------------
// Provider wire shapes
// ---------------------------------------------------------------------------

/// Top-level search response. `results` is required; a body without it is
/// a malformed response, not an empty one.
#[derive(Debug, Deserialize)]
pub(crate) struct RawSearchResponse {
    pub results: Vec<Value>,
    #[serde(default)]
    pub total_results: Option<u64>,
}

/// Error envelope some providers return with a 2xx status.
#[derive(Debug, Deserialize)]
pub(crate) struct RawErrorEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl RawErrorEnvelope {
    /// Returns the provider's message when the envelope reports a failure.
    pub(crate) fn failure_message(&self) -> Option<String> {
        let failed = matches!(
            self.status.as_deref(),
            Some("error" | "ERROR" | "not_ok" | "failed")
        );
        if !failed && self.error.is_none() {
            return None;
        }
        let from_error = self.error.as_ref().and_then(|e| match e {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => map
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned),
            _ => None,
        });
        Some(
            from_error
                .or_else(|| self.message.clone())
                .unwrap_or_else(|| "news API reported an error".to_string()),
        )
    }
}

/// Only `title` and the link are structural; every other field is kept as
/// raw JSON and read leniently so one odd value costs that field alone.
#[derive(Debug, Deserialize)]
struct RawArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    href: Option<String>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    body: Option<Value>,
    #[serde(default)]
    published_at: Option<Value>,
    #[serde(default)]
    source: Option<Value>,
    #[serde(default)]
    sentiment: Option<Value>,
    #[serde(default)]
    image: Option<Value>,
    #[serde(default)]
    read_time: Option<Value>,
    #[serde(default)]
    is_breaking: Option<Value>,
    #[serde(default)]
    categories: Option<Value>,
    #[serde(default)]
    topics: Option<Value>,
    #[serde(default)]
    engagement: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    logo: Option<String>,
    #[serde(default)]
    favicon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSentiment {
    #[serde(default)]
    overall: Option<RawSentimentScore>,
}

#[derive(Debug, Deserialize)]
struct RawSentimentScore {
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    polarity: Option<String>,
}

/// Converts one provider article into a [`NewsArticle`].
///
/// Returns `None` for entries that are not objects, or that lack a title or
/// a link; those are dropped rather than failing the whole page. Optional
/// fields of the wrong type are left empty.
pub(crate) fn parse_article(value: Value) -> Option<NewsArticle> {
    let raw: RawArticle = serde_json::from_value(value).ok()?;

    let title = raw.title.map(|t| t.trim().to_string())?;
    if title.is_empty() {
        return None;
    }
    let url = raw.url.or(raw.href).filter(|u| !u.trim().is_empty())?;

    let source = lenient::<RawSource>(raw.source).and_then(|s| {
        s.name.map(|name| ArticleSource {
            name,
            logo: s.logo.or(s.favicon),
        })
    });

    let sentiment = lenient::<RawSentiment>(raw.sentiment)
        .and_then(|s| s.overall)
        .and_then(|o| {
            let label = o.label.or(o.polarity)?;
            Some(ArticleSentiment {
                score: o.score.unwrap_or(0.0),
                label,
            })
        });

    Some(NewsArticle {
        title,
        url,
        description: string_field(raw.description).or_else(|| string_field(raw.body)),
        published_at: string_field(raw.published_at),
        source,
        sentiment,
        image: string_field(raw.image),
        read_time: raw
            .read_time
            .as_ref()
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok()),
        is_breaking: raw
            .is_breaking
            .as_ref()
            .and_then(Value::as_bool)
            .unwrap_or(false),
        categories: label_list(raw.categories),
        topics: label_list(raw.topics),
        engagement: raw.engagement.as_ref().and_then(engagement),
    })
}

fn lenient<T: serde::de::DeserializeOwned>(value: Option<Value>) -> Option<T> {
    value.and_then(|v| serde_json::from_value(v).ok())
}

fn string_field(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Reads each counter on its own; counters that are not whole numbers are dropped.
fn engagement(value: &Value) -> Option<ArticleEngagement> {
    let map = value.as_object()?;
    let count = |key: &str| map.get(key).and_then(Value::as_u64);
    Some(ArticleEngagement {
        views: count("views"),
        likes: count("likes"),
        comments: count("comments"),
        shares: count("shares"),
    })
}

/// Flattens a list of strings or `{ "name": .. }` objects into names.
/// Anything that is not an array yields no labels.
fn label_list(value: Option<Value>) -> Vec<String> {
    let Some(Value::Array(values)) = value else {
        return Vec::new();
    };
    values
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s),
            Value::Object(map) => map.get("name").and_then(Value::as_str).map(str::to_owned),
            _ => None,
        })
        .collect()
}
