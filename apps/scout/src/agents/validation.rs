//! Validation: asks the LLM whether a posting matches the ideal profile.
//!
//! Fail-closed: only a reply containing "YES" accepts the job.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::agents::prompts::{VALIDATION_MODEL, VALIDATION_PROMPT_TEMPLATE, VALIDATION_SYSTEM};
use crate::agents::JobValidator;
use crate::errors::PipelineError;
use crate::jobs::JobPosting;
use crate::llm_client::prompts::contains_yes;
use crate::llm_client::LlmBackend;

pub struct LlmValidator {
    llm: Option<Arc<dyn LlmBackend>>,
}

impl LlmValidator {
    /// `llm = None` means no API key is configured: every job is rejected.
    pub fn new(llm: Option<Arc<dyn LlmBackend>>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl JobValidator for LlmValidator {
    async fn validate(&self, job: &JobPosting, ideal_profile: &str) -> Result<bool, PipelineError> {
        let Some(llm) = &self.llm else {
            warn!("Rejecting '{}': OPENROUTER_API_KEY not configured", job.title);
            return Ok(false);
        };

        info!("Validating job: {} at {}", job.title, job.company);
        let prompt = build_validation_prompt(job, ideal_profile);
        let reply = llm
            .complete(VALIDATION_MODEL, VALIDATION_SYSTEM, &prompt)
            .await?;

        let accepted = contains_yes(&reply);
        info!(
            "Validation result for '{}': {} (raw: {:?})",
            job.title,
            if accepted { "YES" } else { "NO" },
            reply.trim().chars().take(40).collect::<String>()
        );
        Ok(accepted)
    }
}

/// Fills the validation template. Free-text fields are substituted last so that
/// braces inside them are never treated as placeholders.
fn build_validation_prompt(job: &JobPosting, ideal_profile: &str) -> String {
    VALIDATION_PROMPT_TEMPLATE
        .replace("{title}", &job.title)
        .replace("{company}", &job.company)
        .replace("{location}", &job.location)
        .replace("{ideal_profile}", ideal_profile.trim())
        .replace("{description}", &job.description)
}
