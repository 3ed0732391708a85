//! Command handlers. Each prints its result as pretty JSON on stdout.

use anyhow::Context;
use repwatch_core::{normalize_keywords, AppConfig};
use repwatch_pipeline::Pipeline;
use serde::Serialize;

/// Keywords for a collect run: explicit `--keyword` values win over the
/// configured tracked keywords.
pub(crate) fn resolve_keywords(requested: &[String], tracked: &[String]) -> Vec<String> {
    if requested.is_empty() {
        normalize_keywords(tracked)
    } else {
        normalize_keywords(requested)
    }
}

pub(crate) async fn run_collect(
    config: &AppConfig,
    requested: &[String],
    dry_run: bool,
) -> anyhow::Result<()> {
    let keywords = resolve_keywords(requested, &config.tracked_keywords);
    if keywords.is_empty() {
        anyhow::bail!("no keywords given; pass --keyword or set REPWATCH_TRACKED_KEYWORDS");
    }

    let pipeline = Pipeline::from_config(config)?;
    if dry_run {
        let settings = pipeline.settings();
        println!(
            "dry-run: would collect {} keywords: [{}] (concurrency {}, social platform {})",
            keywords.len(),
            keywords.join(", "),
            settings.max_concurrent_keywords,
            settings.social_platform_id.as_deref().unwrap_or("none")
        );
        return Ok(());
    }

    let results = pipeline
        .collect_keywords_with(&keywords, |result| match &result.error {
            Some(error) => tracing::warn!(keyword = %result.keyword, %error, "keyword failed"),
            None => tracing::info!(
                keyword = %result.keyword,
                articles = result.news_data.results.len(),
                posts = result.social_data.content.len(),
                "keyword collected"
            ),
        })
        .await;

    print_json(&results)
}

pub(crate) async fn run_listen(config: &AppConfig, keyword: &str) -> anyhow::Result<()> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        anyhow::bail!("keyword must not be empty");
    }

    let pipeline = Pipeline::from_config(config)?;
    let report = pipeline
        .listen(keyword)
        .await
        .with_context(|| format!("social listening for '{keyword}' failed"))?;

    print_json(&report)
}

pub(crate) async fn run_platforms(config: &AppConfig) -> anyhow::Result<()> {
    let pipeline = Pipeline::from_config(config)?;
    let platforms = pipeline.eligible_platforms().await?;
    print_json(&platforms)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render output")?;
    println!("{rendered}");
    Ok(())
}
