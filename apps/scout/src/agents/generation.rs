//! Content generation: resume suggestions and a cover letter for one posting.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::agents::prompts::{
    FEEDBACK_TEMPLATE, FINAL_ATTEMPT_NOTICE, GENERATION_MODEL, GENERATION_PROMPT_TEMPLATE,
    GENERATION_SYSTEM, NO_WRITING_SAMPLES, SAMPLE_DIVIDER,
};
use crate::agents::ContentGenerator;
use crate::errors::PipelineError;
use crate::jobs::JobPosting;
use crate::llm_client::prompts::{split_sections, TWO_SECTION_INSTRUCTION};
use crate::llm_client::LlmBackend;
use crate::models::{CandidateProfile, GeneratedContent};

pub const SKIPPED_SUGGESTIONS: &str = "Content generation skipped due to missing API key.";
pub const SKIPPED_COVER_LETTER: &str = "Content generation skipped.";
pub const UNPARSED_COVER_LETTER: &str = "Could not parse response.";

pub struct LlmGenerator {
    llm: Option<Arc<dyn LlmBackend>>,
}

impl LlmGenerator {
    pub fn new(llm: Option<Arc<dyn LlmBackend>>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ContentGenerator for LlmGenerator {
    async fn generate(
        &self,
        job: &JobPosting,
        candidate: &CandidateProfile,
        feedback: Option<&str>,
        is_final: bool,
    ) -> Result<GeneratedContent, PipelineError> {
        let Some(llm) = &self.llm else {
            warn!("Skipping content generation for '{}': OPENROUTER_API_KEY not configured", job.title);
            return Ok(GeneratedContent {
                resume_suggestions: SKIPPED_SUGGESTIONS.to_string(),
                cover_letter: SKIPPED_COVER_LETTER.to_string(),
            });
        };

        info!("Generating content for: {}", job.title);
        let prompt = build_generation_prompt(job, candidate, feedback, is_final);
        let reply = llm
            .complete(GENERATION_MODEL, GENERATION_SYSTEM, &prompt)
            .await?;

        Ok(parse_generation_reply(&reply))
    }
}

/// Splits the reply into suggestions and cover letter. A reply that breaks the
/// two-section contract is kept whole as the suggestions so no work is lost.
pub fn parse_generation_reply(reply: &str) -> GeneratedContent {
    match split_sections(reply) {
        Some((suggestions, cover_letter)) => GeneratedContent {
            resume_suggestions: suggestions.to_string(),
            cover_letter: cover_letter.to_string(),
        },
        None => {
            warn!("Generation reply did not contain exactly one section separator");
            GeneratedContent {
                resume_suggestions: reply.trim().to_string(),
                cover_letter: UNPARSED_COVER_LETTER.to_string(),
            }
        }
    }
}

fn build_generation_prompt(
    job: &JobPosting,
    candidate: &CandidateProfile,
    feedback: Option<&str>,
    is_final: bool,
) -> String {
    let mut feedback_section = String::new();
    if let Some(reason) = feedback.map(str::trim).filter(|r| !r.is_empty()) {
        feedback_section.push_str(&FEEDBACK_TEMPLATE.replace("{reason}", reason));
    }
    if is_final {
        feedback_section.push_str(FINAL_ATTEMPT_NOTICE);
    }

    let writing_samples = if candidate.writing_samples.is_empty() {
        NO_WRITING_SAMPLES.to_string()
    } else {
        candidate.writing_samples.join(SAMPLE_DIVIDER)
    };

    GENERATION_PROMPT_TEMPLATE
        .replace("{title}", &job.title)
        .replace("{company}", &job.company)
        .replace("{location}", &job.location)
        .replace("{format_instruction}", TWO_SECTION_INSTRUCTION)
        .replace("{feedback_section}", &feedback_section)
        .replace("{resume_json}", &candidate.resume_pretty())
        .replace("{ideal_profile}", candidate.ideal_profile.trim())
        .replace("{writing_samples}", &writing_samples)
        .replace("{description}", &job.description)
}
