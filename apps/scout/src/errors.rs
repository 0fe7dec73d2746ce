use thiserror::Error;

use crate::llm_client::LlmError;

/// Pipeline-level error type.
/// Every step returns `Result<T, PipelineError>`; the orchestrator catches these
/// per job so one failing posting never aborts the batch.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Notification error: {0}")]
    Notify(String),

    #[error("Job source error: {0}")]
    Source(String),
}

impl PipelineError {
    /// Short machine-readable code used in structured log fields.
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::Io(_) => "IO_ERROR",
            PipelineError::Llm(_) => "LLM_ERROR",
            PipelineError::Notify(_) => "NOTIFY_ERROR",
            PipelineError::Source(_) => "SOURCE_ERROR",
        }
    }
}
