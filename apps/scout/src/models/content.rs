use serde::{Deserialize, Serialize};

/// The two pieces of tailored material produced for one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub resume_suggestions: String,
    pub cover_letter: String,
}

/// One pass through the generation/review loop. Lives only while that job is processed.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationAttempt {
    /// 0-based.
    pub attempt_number: u32,
    pub resume_suggestions: String,
    pub cover_letter: String,
    /// Empty unless the reviewer rejected this attempt.
    pub rejection_reason: String,
}

impl GenerationAttempt {
    pub fn new(attempt_number: u32, content: &GeneratedContent) -> Self {
        Self {
            attempt_number,
            resume_suggestions: content.resume_suggestions.clone(),
            cover_letter: content.cover_letter.clone(),
            rejection_reason: String::new(),
        }
    }

    pub fn was_rejected(&self) -> bool {
        !self.rejection_reason.is_empty()
    }
}

/// Reviewer decision for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewVerdict {
    pub approved: bool,
    pub reason: String,
}

impl ReviewVerdict {
    pub fn approve(reason: impl Into<String>) -> Self {
        Self {
            approved: true,
            reason: reason.into(),
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            approved: false,
            reason: reason.into(),
        }
    }
}
