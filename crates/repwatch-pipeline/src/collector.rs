//! Keyword collection: news fetch plus one social search job per keyword.

use futures::stream::{self, StreamExt};

use crate::classify::{describe_news_error, describe_social_error, timed_out_message};
use crate::job::{run_search_job, JobOutcome};
use crate::types::{CollectionResult, SocialData, SocialStatus};
use crate::Pipeline;

impl Pipeline {
    /// Collects news and social data for one keyword.
    ///
    /// Never fails: a news failure yields [`CollectionResult::failed`] and
    /// skips the social step; social failures are reported in `social_data`.
    pub async fn collect_keyword(&self, keyword: &str) -> CollectionResult {
        let news_data = match self.news.search(keyword).await {
            Ok(data) => data,
            Err(e) => {
                let message = describe_news_error(&e);
                tracing::warn!(keyword, error = %e, "news fetch failed");
                return CollectionResult::failed(keyword, message);
            }
        };
        tracing::debug!(keyword, count = news_data.results.len(), "news fetched");

        let (social_data, social_search_id) = self.collect_social(keyword).await;

        CollectionResult {
            keyword: keyword.to_owned(),
            news_data,
            social_data,
            social_search_id,
            timestamp: chrono::Utc::now(),
            error: None,
        }
    }

    /// Collects every keyword, returning one result per keyword in input order.
    pub async fn collect_keywords(&self, keywords: &[String]) -> Vec<CollectionResult> {
        self.collect_keywords_with(keywords, |_| {}).await
    }

    /// Like [`Pipeline::collect_keywords`], calling `on_result` for each
    /// result as it becomes available, in input order.
    ///
    /// Up to `max_concurrent_keywords` keywords are in flight at once.
    pub async fn collect_keywords_with<F>(
        &self,
        keywords: &[String],
        mut on_result: F,
    ) -> Vec<CollectionResult>
    where
        F: FnMut(&CollectionResult),
    {
        let limit = self.settings.max_concurrent_keywords.max(1);
        tracing::info!(
            keywords = keywords.len(),
            limit,
            max_poll_wait_ms = self.settings.collect_poll.max_wait().as_millis(),
            "starting collection run"
        );

        let mut results = Vec::with_capacity(keywords.len());
        let mut in_flight = stream::iter(keywords.iter().cloned())
            .map(|keyword| async move { self.collect_keyword(&keyword).await })
            .buffered(limit);

        while let Some(result) = in_flight.next().await {
            on_result(&result);
            results.push(result);
        }

        let failed = results.iter().filter(|r| r.is_error()).count();
        tracing::info!(
            keywords = results.len(),
            failed,
            "collection run finished"
        );
        results
    }

    async fn collect_social(&self, keyword: &str) -> (SocialData, Option<String>) {
        let Some(platform_id) = self.settings.social_platform_id.as_deref() else {
            return (
                SocialData::skipped("No social platform configured for keyword collection"),
                None,
            );
        };

        let outcome =
            match run_search_job(&self.social, platform_id, keyword, &self.settings.collect_poll)
                .await
            {
                Ok(outcome) => outcome,
                Err(err) => {
                    tracing::warn!(keyword, platform_id, error = %err, "social search failed");
                    let data = SocialData::unsuccessful(
                        SocialStatus::Error,
                        Some(platform_id),
                        describe_social_error(&err.source),
                    );
                    return (data, err.job_id);
                }
            };

        let job_id = outcome.job_id().to_owned();
        let data = match outcome {
            JobOutcome::Completed { content, .. } => SocialData::success(platform_id, content),
            JobOutcome::Failed { message, .. } => {
                SocialData::unsuccessful(SocialStatus::Failed, Some(platform_id), message)
            }
            JobOutcome::TimedOut { attempts, .. } => SocialData::unsuccessful(
                SocialStatus::TimedOut,
                Some(platform_id),
                timed_out_message(attempts),
            ),
        };
        (data, Some(job_id))
    }
}
