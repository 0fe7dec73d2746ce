//! Agents: the three LLM-backed steps of the pipeline and the loop that drives two of them.
//!
//! Each step is a trait so the orchestrator and the retry loop can be exercised
//! with scripted fakes. The LLM-backed implementations live in the sibling modules
//! and all go through `llm_client::LlmBackend`.

use async_trait::async_trait;

use crate::errors::PipelineError;
use crate::jobs::JobPosting;
use crate::models::{CandidateProfile, GeneratedContent, ReviewVerdict};

pub mod generation;
pub mod prompts;
pub mod review;
pub mod validation;
pub mod workflow;

pub use generation::LlmGenerator;
pub use review::LlmReviewer;
pub use validation::LlmValidator;
pub use workflow::GenerationLoop;

/// Binary accept/reject of a posting against the candidate's ideal profile.
#[async_trait]
pub trait JobValidator: Send + Sync {
    async fn validate(&self, job: &JobPosting, ideal_profile: &str) -> Result<bool, PipelineError>;
}

/// Produces tailored resume suggestions and a cover letter for one posting.
///
/// `feedback` is the previous reviewer's rejection reason, if any.
/// `is_final` tells the generator its output will be sent without review.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(
        &self,
        job: &JobPosting,
        candidate: &CandidateProfile,
        feedback: Option<&str>,
        is_final: bool,
    ) -> Result<GeneratedContent, PipelineError>;
}

/// Quality gate over generated content.
#[async_trait]
pub trait ContentReviewer: Send + Sync {
    async fn review(
        &self,
        job: &JobPosting,
        content: &GeneratedContent,
    ) -> Result<ReviewVerdict, PipelineError>;
}
