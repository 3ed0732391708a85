//! Create → poll → fetch lifecycle of one social search job.

use repwatch_social::{JobStatus, SearchJob, SocialClient, SocialContent, SocialError};
use thiserror::Error;

use crate::classify::JOB_FAILED_WITHOUT_MESSAGE;
use crate::settings::PollPolicy;

/// Terminal state of a search job that the API answered for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Completed {
        job_id: String,
        content: Vec<SocialContent>,
    },
    Failed {
        job_id: String,
        message: String,
    },
    /// Still running after the whole poll budget.
    TimedOut { job_id: String, attempts: u32 },
}

impl JobOutcome {
    #[must_use]
    pub fn job_id(&self) -> &str {
        match self {
            Self::Completed { job_id, .. }
            | Self::Failed { job_id, .. }
            | Self::TimedOut { job_id, .. } => job_id,
        }
    }
}

/// A create, poll or fetch call failed. `job_id` is set once the job exists.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct JobError {
    pub job_id: Option<String>,
    #[source]
    pub source: SocialError,
}

/// Runs one search job for `keyword` on `platform_id`.
///
/// The status returned by the create call is honoured: a job born `SUCCESS`
/// is fetched at once and a job born `FAILED` is not polled. Otherwise the
/// job is checked up to `policy.max_attempts` times, sleeping
/// `policy.interval` before each check. Unknown statuses count as still
/// running. Results are fetched only after `SUCCESS` was observed.
///
/// # Errors
///
/// Returns [`JobError`] as soon as any API call fails; no further calls are
/// made for that job.
pub async fn run_search_job(
    social: &SocialClient,
    platform_id: &str,
    keyword: &str,
    policy: &PollPolicy,
) -> Result<JobOutcome, JobError> {
    let created = social
        .create_search_job(platform_id, keyword)
        .await
        .map_err(|source| JobError {
            job_id: None,
            source,
        })?;
    let job_id = created.id.clone();
    let with_id = |source: SocialError| JobError {
        job_id: Some(job_id.clone()),
        source,
    };

    let mut job: SearchJob = created;
    let mut attempts = 0u32;
    loop {
        match job.status {
            JobStatus::Success => {
                let content = social
                    .fetch_search_results(&job_id)
                    .await
                    .map_err(with_id)?;
                tracing::debug!(
                    job_id = %job_id,
                    platform_id,
                    keyword,
                    count = content.len(),
                    "search job completed"
                );
                return Ok(JobOutcome::Completed { job_id, content });
            }
            JobStatus::Failed => {
                let message = job
                    .error_message()
                    .unwrap_or_else(|| JOB_FAILED_WITHOUT_MESSAGE.to_owned());
                tracing::warn!(
                    job_id = %job_id,
                    platform_id,
                    keyword,
                    error = %message,
                    "search job failed"
                );
                return Ok(JobOutcome::Failed { job_id, message });
            }
            JobStatus::InProgress | JobStatus::Unknown => {
                if attempts >= policy.max_attempts {
                    tracing::warn!(
                        job_id = %job_id,
                        platform_id,
                        keyword,
                        attempts,
                        "search job still in progress after poll budget"
                    );
                    return Ok(JobOutcome::TimedOut { job_id, attempts });
                }
                attempts += 1;
                tokio::time::sleep(policy.interval).await;
                job = social.get_search_job(&job_id).await.map_err(with_id)?;
                tracing::debug!(
                    job_id = %job_id,
                    attempt = attempts,
                    status = ?job.status,
                    "polled search job"
                );
            }
        }
    }
}
