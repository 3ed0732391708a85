use repwatch_news::NewsError;
use repwatch_social::SocialError;
use thiserror::Error;

/// Errors that stop a pipeline operation as a whole.
///
/// Per-keyword and per-platform failures never surface here; they are folded
/// into the corresponding result as a message.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to build news client: {0}")]
    NewsClient(#[source] NewsError),

    #[error("failed to build social client: {0}")]
    SocialClient(#[source] SocialError),

    #[error("failed to load platform directory: {message}")]
    PlatformDirectory {
        message: String,
        #[source]
        source: SocialError,
    },
}
