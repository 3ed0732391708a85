//! News-search API client.
//!
//! Issues one search per keyword and converts the provider's JSON into a
//! typed [`NewsData`] immediately after the fetch. There is no
//! retry here: callers own the failure boundary for a keyword.

pub mod client;
pub mod error;
pub mod types;

pub use client::NewsClient;
pub use error::NewsError;
pub use types::{
    ArticleEngagement, ArticleSentiment, ArticleSource, NewsArticle, NewsData, NewsStatus,
};
