//! Background collection scheduler.
//!
//! When a cron expression and tracked keywords are configured, registers a
//! recurring collection run over the tracked keywords. Results are logged as
//! a per-run summary; storing them is up to downstream consumers.

use std::sync::Arc;

use repwatch_core::{normalize_keywords, AppConfig};
use repwatch_pipeline::{CollectionResult, Pipeline, SocialStatus};
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Counts logged at the end of a scheduled run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub keywords: usize,
    pub failed_keywords: usize,
    pub articles: usize,
    pub social_posts: usize,
    pub social_incomplete: usize,
}

impl RunSummary {
    fn record(&mut self, result: &CollectionResult) {
        self.keywords += 1;
        if result.is_error() {
            self.failed_keywords += 1;
        }
        self.articles += result.news_data.results.len();
        self.social_posts += result.social_data.content.len();
        if !matches!(
            result.social_data.status,
            SocialStatus::Success | SocialStatus::Skipped
        ) {
            self.social_incomplete += 1;
        }
    }
}

/// Builds and starts the scheduler, or returns `None` when no schedule is
/// configured.
///
/// The returned [`JobScheduler`] must be kept alive for the lifetime of the
/// process; dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the cron expression is invalid or the
/// scheduler cannot be started.
pub async fn build_scheduler(
    pipeline: Arc<Pipeline>,
    config: &AppConfig,
) -> Result<Option<JobScheduler>, JobSchedulerError> {
    let Some(schedule) = config.collect_cron.as_deref() else {
        tracing::info!("REPWATCH_COLLECT_CRON not set; scheduled collection disabled");
        return Ok(None);
    };

    let keywords = normalize_keywords(&config.tracked_keywords);
    if keywords.is_empty() {
        tracing::warn!(
            schedule,
            "REPWATCH_COLLECT_CRON set but REPWATCH_TRACKED_KEYWORDS is empty; scheduled collection disabled"
        );
        return Ok(None);
    }

    let scheduler = JobScheduler::new().await?;
    register_collect_job(&scheduler, schedule, pipeline, keywords).await?;
    scheduler.start().await?;
    tracing::info!(schedule, "scheduled collection enabled");
    Ok(Some(scheduler))
}

async fn register_collect_job(
    scheduler: &JobScheduler,
    schedule: &str,
    pipeline: Arc<Pipeline>,
    keywords: Vec<String>,
) -> Result<(), JobSchedulerError> {
    let keywords = Arc::new(keywords);

    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let pipeline = Arc::clone(&pipeline);
        let keywords = Arc::clone(&keywords);

        Box::pin(async move {
            tracing::info!(
                keywords = keywords.len(),
                "scheduler: starting collection run"
            );
            let summary = run_scheduled_collection(&pipeline, &keywords).await;
            tracing::info!(
                keywords = summary.keywords,
                failed_keywords = summary.failed_keywords,
                articles = summary.articles,
                social_posts = summary.social_posts,
                social_incomplete = summary.social_incomplete,
                "scheduler: collection run complete"
            );
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}

pub(crate) async fn run_scheduled_collection(
    pipeline: &Pipeline,
    keywords: &[String],
) -> RunSummary {
    let mut summary = RunSummary::default();
    pipeline
        .collect_keywords_with(keywords, |result| {
            if let Some(error) = &result.error {
                tracing::warn!(keyword = %result.keyword, %error, "scheduler: keyword failed");
            }
            summary.record(result);
        })
        .await;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::test_config;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn no_schedule_means_no_scheduler() {
        let config = test_config("http://127.0.0.1:9");
        let pipeline = Arc::new(Pipeline::from_config(&config).unwrap());
        assert!(build_scheduler(pipeline, &config).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn schedule_without_keywords_is_disabled() {
        let mut config = test_config("http://127.0.0.1:9");
        config.collect_cron = Some("0 0 * * * *".to_owned());
        let pipeline = Arc::new(Pipeline::from_config(&config).unwrap());
        assert!(build_scheduler(pipeline, &config).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn invalid_cron_fails_startup() {
        let mut config = test_config("http://127.0.0.1:9");
        config.collect_cron = Some("not a cron".to_owned());
        config.tracked_keywords = vec!["acme".to_owned()];
        let pipeline = Arc::new(Pipeline::from_config(&config).unwrap());
        assert!(build_scheduler(pipeline, &config).await.is_err());
    }

    #[tokio::test]
    async fn scheduled_run_summarizes_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .and(query_param("title", "acme"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "results": [
                    { "title": "One", "url": "https://news.example.com/1" },
                    { "title": "Two", "url": "https://news.example.com/2" }
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .and(query_param("title", "widgetco"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let pipeline = Pipeline::from_config(&test_config(&server.uri())).unwrap();
        let keywords = vec!["acme".to_owned(), "widgetco".to_owned()];
        let summary = run_scheduled_collection(&pipeline, &keywords).await;

        assert_eq!(
            summary,
            RunSummary {
                keywords: 2,
                failed_keywords: 1,
                articles: 2,
                social_posts: 0,
                social_incomplete: 0,
            }
        );
    }
}
