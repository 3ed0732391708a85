//! Social listening: one keyword searched across every eligible platform.

use repwatch_social::Platform;

use crate::classify::{describe_social_error, timed_out_message};
use crate::error::PipelineError;
use crate::job::{run_search_job, JobOutcome};
use crate::types::{ListeningReport, PlatformOutcome, PlatformResult};
use crate::Pipeline;

impl Pipeline {
    /// Active social platforms from the directory, in directory order.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::PlatformDirectory`] if the directory cannot
    /// be loaded.
    pub async fn eligible_platforms(&self) -> Result<Vec<Platform>, PipelineError> {
        let platforms = self
            .social
            .list_platforms()
            .await
            .map_err(|source| PipelineError::PlatformDirectory {
                message: describe_social_error(&source),
                source,
            })?;
        Ok(platforms.into_iter().filter(Platform::is_searchable).collect())
    }

    /// Searches `keyword` on every eligible platform, one platform at a time.
    ///
    /// Every eligible platform gets exactly one outcome. Platforms after the
    /// first wait `inter_platform_delay` before their job is created.
    ///
    /// # Errors
    ///
    /// Only a platform directory failure fails the whole run.
    pub async fn listen(&self, keyword: &str) -> Result<ListeningReport, PipelineError> {
        let platforms = self.eligible_platforms().await?;
        tracing::info!(
            keyword,
            platforms = platforms.len(),
            max_poll_wait_ms = self.settings.listen_poll.max_wait().as_millis(),
            "starting social listening"
        );

        let mut outcomes = Vec::with_capacity(platforms.len());
        for (index, platform) in platforms.into_iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.settings.inter_platform_delay).await;
            }

            let result = match run_search_job(
                &self.social,
                &platform.id,
                keyword,
                &self.settings.listen_poll,
            )
            .await
            {
                Ok(JobOutcome::Completed { content, .. }) => PlatformResult::Success { content },
                Ok(JobOutcome::Failed { message, .. }) => {
                    PlatformResult::Failure { error: message }
                }
                Ok(JobOutcome::TimedOut { attempts, .. }) => PlatformResult::Failure {
                    error: timed_out_message(attempts),
                },
                Err(err) => {
                    tracing::warn!(
                        keyword,
                        platform = %platform.name,
                        error = %err,
                        "platform search failed"
                    );
                    PlatformResult::Failure {
                        error: describe_social_error(&err.source),
                    }
                }
            };

            outcomes.push(PlatformOutcome {
                platform_id: platform.id,
                platform: platform.name,
                result,
            });
        }

        let report = ListeningReport {
            keyword: keyword.to_owned(),
            outcomes,
            timestamp: chrono::Utc::now(),
        };
        tracing::info!(
            keyword,
            platforms = report.outcomes.len(),
            succeeded = report.success_count(),
            "social listening finished"
        );
        Ok(report)
    }
}
