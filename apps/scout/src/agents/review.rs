//! Content review: second LLM pass that approves or rejects generated material.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::agents::prompts::{REVIEW_MODEL, REVIEW_PROMPT_TEMPLATE, REVIEW_SYSTEM};
use crate::agents::ContentReviewer;
use crate::errors::PipelineError;
use crate::jobs::JobPosting;
use crate::llm_client::prompts::{contains_yes, split_sections, TWO_SECTION_INSTRUCTION};
use crate::llm_client::LlmBackend;
use crate::models::{GeneratedContent, ReviewVerdict};

pub const FALLBACK_APPROVAL: &str = "Approved under fallback.";
pub const UNPARSED_REJECTION: &str = "Could not parse review response.";
pub const MISSING_REASON: &str = "Reviewer gave no reason.";

pub struct LlmReviewer {
    llm: Option<Arc<dyn LlmBackend>>,
}

impl LlmReviewer {
    /// `llm = None` means no API key is configured: everything is approved so the
    /// pipeline is never blocked on a missing reviewer.
    pub fn new(llm: Option<Arc<dyn LlmBackend>>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ContentReviewer for LlmReviewer {
    async fn review(
        &self,
        job: &JobPosting,
        content: &GeneratedContent,
    ) -> Result<ReviewVerdict, PipelineError> {
        let Some(llm) = &self.llm else {
            warn!("Skipping review for '{}': OPENROUTER_API_KEY not configured", job.title);
            return Ok(ReviewVerdict::approve(FALLBACK_APPROVAL));
        };

        info!("Reviewing content for: {}", job.title);
        let prompt = build_review_prompt(job, content);
        let reply = llm.complete(REVIEW_MODEL, REVIEW_SYSTEM, &prompt).await?;

        let verdict = parse_review_reply(&reply);
        info!(
            "Review decision for '{}': {}. Reason: {}",
            job.title,
            if verdict.approved { "YES" } else { "NO" },
            verdict.reason
        );
        Ok(verdict)
    }
}

/// Strict form: `YES|NO ---SPLIT--- reason`. Without the separator the reply is
/// approved only if it contains "YES" anywhere.
pub fn parse_review_reply(reply: &str) -> ReviewVerdict {
    match split_sections(reply) {
        Some((decision, reason)) => {
            let approved = decision
                .trim_matches(|c: char| !c.is_ascii_alphanumeric())
                .eq_ignore_ascii_case("YES");
            let reason = if reason.is_empty() {
                MISSING_REASON.to_string()
            } else {
                reason.to_string()
            };
            ReviewVerdict { approved, reason }
        }
        None => {
            warn!("Review reply did not contain the expected section separator");
            if contains_yes(reply) {
                ReviewVerdict::approve(FALLBACK_APPROVAL)
            } else {
                ReviewVerdict::reject(UNPARSED_REJECTION)
            }
        }
    }
}

fn build_review_prompt(job: &JobPosting, content: &GeneratedContent) -> String {
    REVIEW_PROMPT_TEMPLATE
        .replace("{title}", &job.title)
        .replace("{company}", &job.company)
        .replace("{format_instruction}", TWO_SECTION_INSTRUCTION)
        .replace("{description}", &job.description)
        .replace("{resume_suggestions}", &content.resume_suggestions)
        .replace("{cover_letter}", &content.cover_letter)
}
