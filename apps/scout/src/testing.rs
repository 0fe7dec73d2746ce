// Scripted fakes for unit tests.
//
// Every fake records its calls so tests can assert exactly how many times each
// pipeline step ran and with which arguments.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use crate::agents::{ContentGenerator, ContentReviewer, JobValidator};
use crate::errors::PipelineError;
use crate::jobs::JobPosting;
use crate::llm_client::{LlmBackend, LlmError};
use crate::models::{CandidateProfile, GeneratedContent, ReviewVerdict};
use crate::notifier::Notifier;

pub fn sample_job(url: &str) -> JobPosting {
    JobPosting {
        title: "Associate Product Manager".to_string(),
        company: "Acme".to_string(),
        location: "Remote".to_string(),
        description: "Own the roadmap for checkout. 2+ years of experience.".to_string(),
        url: url.to_string(),
        search_origin: "https://www.linkedin.com/jobs/search?keywords=apm".to_string(),
        platform: "linkedin".to_string(),
    }
}

pub fn sample_candidate() -> CandidateProfile {
    CandidateProfile {
        ideal_profile: "Early-career product management, remote.".to_string(),
        resume: json!({"experience": ["Product Analyst at Acme"], "skills": ["SQL"]}),
        writing_samples: vec!["I write plainly.".to_string()],
    }
}

pub fn sample_content(n: usize) -> GeneratedContent {
    GeneratedContent {
        resume_suggestions: format!("suggestions v{n}"),
        cover_letter: format!("letter v{n}"),
    }
}

// =============================================================================
// LLM backend
// =============================================================================

/// Returns queued replies in order; an exhausted queue yields `EmptyContent`.
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedLlm {
    pub fn new(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn models(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(m, _)| m.clone()).collect()
    }
}

#[async_trait]
impl LlmBackend for ScriptedLlm {
    async fn complete(&self, model: &str, _system: &str, prompt: &str) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

// =============================================================================
// Agents
// =============================================================================

/// Answers every validation with a fixed result.
pub struct StaticValidator {
    accept: bool,
    fail: bool,
    calls: Mutex<Vec<String>>,
}

impl StaticValidator {
    pub fn accepting() -> Self {
        Self {
            accept: true,
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            accept: false,
            ..Self::accepting()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::accepting()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl JobValidator for StaticValidator {
    async fn validate(&self, job: &JobPosting, _ideal_profile: &str) -> Result<bool, PipelineError> {
        self.calls.lock().unwrap().push(job.url.clone());
        if self.fail {
            return Err(PipelineError::Llm(LlmError::Api {
                status: 503,
                message: "provider unavailable".to_string(),
            }));
        }
        Ok(self.accept)
    }
}

#[derive(Debug, Clone)]
pub struct GenerateCall {
    pub feedback: Option<String>,
    pub is_final: bool,
}

/// Produces `sample_content(n)` for the n-th call (0-based).
pub struct ScriptedGenerator {
    fail_on: Option<usize>,
    calls: Mutex<Vec<GenerateCall>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self {
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The call with this 0-based index returns an LLM error.
    pub fn failing_on(mut self, call_index: usize) -> Self {
        self.fail_on = Some(call_index);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<GenerateCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        _job: &JobPosting,
        _candidate: &CandidateProfile,
        feedback: Option<&str>,
        is_final: bool,
    ) -> Result<GeneratedContent, PipelineError> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(GenerateCall {
                feedback: feedback.map(str::to_string),
                is_final,
            });
            calls.len() - 1
        };
        if self.fail_on == Some(n) {
            return Err(PipelineError::Llm(LlmError::EmptyContent));
        }
        Ok(sample_content(n))
    }
}

/// Returns queued verdicts in order; an exhausted queue approves.
pub struct ScriptedReviewer {
    verdicts: Mutex<VecDeque<Result<ReviewVerdict, PipelineError>>>,
    calls: Mutex<Vec<GeneratedContent>>,
}

impl ScriptedReviewer {
    pub fn new(verdicts: Vec<Result<ReviewVerdict, PipelineError>>) -> Self {
        Self {
            verdicts: Mutex::new(verdicts.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ContentReviewer for ScriptedReviewer {
    async fn review(
        &self,
        _job: &JobPosting,
        content: &GeneratedContent,
    ) -> Result<ReviewVerdict, PipelineError> {
        self.calls.lock().unwrap().push(content.clone());
        self.verdicts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ReviewVerdict::approve("looks good")))
    }
}

// =============================================================================
// Notifier
// =============================================================================

/// Records delivered messages; optionally fails every message containing a marker.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<String>>>,
    fail_when_contains: Option<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_when_contains(marker: &str) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_when_contains: Some(marker.to_string()),
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, message: &str) -> Result<(), PipelineError> {
        if let Some(marker) = &self.fail_when_contains {
            if message.contains(marker.as_str()) {
                return Err(PipelineError::Notify("chat not found".to_string()));
            }
        }
        self.sent.lock().unwrap().push(message.to_string());
        Ok(())
    }
}
