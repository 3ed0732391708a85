//! Client for the social-content search API.
//!
//! Exposes the platform directory and the three calls of an asynchronous
//! search job: create, status and fetch. Polling policy lives with the
//! caller; this crate only retries idempotent reads on transient errors.

pub mod client;
pub mod error;
pub mod types;

mod retry;

pub use client::SocialClient;
pub use error::SocialError;
pub use types::{
    ContentEngagement, ContentProfile, JobStatus, Platform, PlatformCategory, PlatformRef,
    PlatformStatus, SearchJob, SocialContent,
};
