//! Generation/review loop: the bounded retry state machine.
//!
//! Flow per attempt `i` (0-based):
//!   Generating → (i is last? Accepted : Reviewing)
//!   Reviewing  → approved? Accepted : Retrying → Generating(i + 1)
//!
//! At most `MAX_ATTEMPTS` generations and `MAX_ATTEMPTS - 1` reviews per job.
//! The last attempt is accepted without review so a job always ends with
//! content once it has passed validation. Generator/reviewer errors are not
//! rejections: they abort the loop and propagate to the caller.

use std::sync::Arc;

use tracing::{info, warn};

use crate::agents::{ContentGenerator, ContentReviewer};
use crate::errors::PipelineError;
use crate::jobs::JobPosting;
use crate::models::{CandidateProfile, GeneratedContent, GenerationAttempt, NotificationBundle};

/// Total generation attempts per job, including the unreviewed final one.
pub const MAX_ATTEMPTS: u32 = 3;

/// How the loop reached acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// The reviewer approved a non-final attempt.
    Reviewed,
    /// Final attempt, accepted without review.
    FinalAttempt,
}

#[derive(Debug, Clone)]
pub struct LoopOutcome {
    pub content: GeneratedContent,
    pub acceptance: Acceptance,
    /// Every attempt in order; all but the last carry a rejection reason.
    pub attempts: Vec<GenerationAttempt>,
}

impl LoopOutcome {
    pub fn bundle(&self, job: &JobPosting) -> NotificationBundle {
        NotificationBundle::new(job, &self.content)
    }
}

#[derive(Clone)]
pub struct GenerationLoop {
    generator: Arc<dyn ContentGenerator>,
    reviewer: Arc<dyn ContentReviewer>,
}

impl GenerationLoop {
    pub fn new(generator: Arc<dyn ContentGenerator>, reviewer: Arc<dyn ContentReviewer>) -> Self {
        Self {
            generator,
            reviewer,
        }
    }

    pub async fn run(
        &self,
        job: &JobPosting,
        candidate: &CandidateProfile,
    ) -> Result<LoopOutcome, PipelineError> {
        let mut attempts: Vec<GenerationAttempt> = Vec::new();
        let mut feedback: Option<String> = None;
        let mut attempt = 0;

        loop {
            let is_final = attempt + 1 >= MAX_ATTEMPTS;

            info!(
                "Generation attempt {}/{} for '{}'",
                attempt + 1,
                MAX_ATTEMPTS,
                job.title
            );
            let content = self
                .generator
                .generate(job, candidate, feedback.as_deref(), is_final)
                .await?;
            let mut record = GenerationAttempt::new(attempt, &content);

            if is_final {
                info!(
                    "Accepting final attempt for '{}' without review",
                    job.title
                );
                attempts.push(record);
                return Ok(LoopOutcome {
                    content,
                    acceptance: Acceptance::FinalAttempt,
                    attempts,
                });
            }

            let verdict = self.reviewer.review(job, &content).await?;
            if verdict.approved {
                info!(
                    "Content for '{}' approved on attempt {}",
                    job.title,
                    attempt + 1
                );
                attempts.push(record);
                return Ok(LoopOutcome {
                    content,
                    acceptance: Acceptance::Reviewed,
                    attempts,
                });
            }

            warn!(
                "Content for '{}' rejected on attempt {}/{}: {}",
                job.title,
                attempt + 1,
                MAX_ATTEMPTS,
                verdict.reason
            );
            record.rejection_reason = verdict.reason.clone();
            attempts.push(record);
            feedback = Some(verdict.reason);
            attempt += 1;
        }
    }
}
