//! Pipeline orchestrator: dedup gate, validation, then the generation/review loop.
//!
//! Per-job isolation: any error inside one job is logged and turned into
//! "no output for this job"; the batch always continues.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::agents::{GenerationLoop, JobValidator};
use crate::dedup::ProcessedJobLog;
use crate::errors::PipelineError;
use crate::jobs::JobPosting;
use crate::models::{CandidateProfile, NotificationBundle};
use crate::notifier::Notifier;

/// What happened to one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// URL already in the dedup log; no LLM calls were made.
    AlreadyProcessed,
    /// Validation said NO.
    Rejected,
    /// Content accepted and URL recorded.
    Accepted(NotificationBundle),
    /// A step failed; the job produced nothing.
    Failed(String),
}

impl JobOutcome {
    pub fn into_bundle(self) -> Option<NotificationBundle> {
        match self {
            JobOutcome::Accepted(bundle) => Some(bundle),
            _ => None,
        }
    }
}

/// Pauses that keep the run polite towards external rate limits.
/// `Default` is no pause at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchDelays {
    /// Between jobs that made external calls.
    pub between_jobs: Duration,
    /// Between the segments of one bundle.
    pub between_messages: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub already_processed: usize,
    pub rejected: usize,
    pub failed: usize,
    /// Bundles whose every segment was delivered.
    pub notified: usize,
    /// Segments the sink failed to deliver.
    pub delivery_failures: usize,
}

pub struct Pipeline {
    dedup: ProcessedJobLog,
    validator: Arc<dyn JobValidator>,
    workflow: GenerationLoop,
    candidate: CandidateProfile,
}

impl Pipeline {
    pub fn new(
        dedup: ProcessedJobLog,
        validator: Arc<dyn JobValidator>,
        workflow: GenerationLoop,
        candidate: CandidateProfile,
    ) -> Self {
        Self {
            dedup,
            validator,
            workflow,
            candidate,
        }
    }

    /// Runs one job through the pipeline. `None` means nothing to send.
    // The batch runner needs the reason, so it calls `process_job_outcome`.
    #[allow(dead_code)]
    pub async fn process_job(&self, job: &JobPosting) -> Option<NotificationBundle> {
        self.process_job_outcome(job).await.into_bundle()
    }

    /// Like `process_job`, but reports why a job produced nothing.
    pub async fn process_job_outcome(&self, job: &JobPosting) -> JobOutcome {
        match self.try_process_job(job).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    code = e.code(),
                    "Failed to process '{}' at {} ({}): {e}",
                    job.title,
                    job.company,
                    job.url
                );
                JobOutcome::Failed(e.to_string())
            }
        }
    }

    async fn try_process_job(&self, job: &JobPosting) -> Result<JobOutcome, PipelineError> {
        if self.dedup.is_processed(&job.url).await? {
            info!("Skipping already processed job: {}", job.url);
            return Ok(JobOutcome::AlreadyProcessed);
        }

        if !self
            .validator
            .validate(job, &self.candidate.ideal_profile)
            .await?
        {
            info!("Job '{}' at {} did not pass validation", job.title, job.company);
            return Ok(JobOutcome::Rejected);
        }

        let outcome = self.workflow.run(job, &self.candidate).await?;
        self.dedup.mark_processed(&job.url).await?;

        let rejections = outcome.attempts.iter().filter(|a| a.was_rejected()).count();
        info!(
            "Job '{}' at {} accepted after {} attempt(s), {} rejected ({:?})",
            job.title,
            job.company,
            outcome.attempts.len(),
            rejections,
            outcome.acceptance
        );
        Ok(JobOutcome::Accepted(outcome.bundle(job)))
    }

    /// Processes jobs strictly in order, one at a time, delivering each bundle
    /// before moving on.
    pub async fn run_batch(
        &self,
        jobs: &[JobPosting],
        notifier: &dyn Notifier,
        delays: BatchDelays,
    ) -> BatchSummary {
        let mut summary = BatchSummary {
            total: jobs.len(),
            ..BatchSummary::default()
        };

        info!(
            "Processing {} jobs (sink: {})",
            jobs.len(),
            notifier.name()
        );

        for (idx, job) in jobs.iter().enumerate() {
            info!("[{}/{}] {} at {}", idx + 1, jobs.len(), job.title, job.company);

            let outcome = self.process_job_outcome(job).await;
            let made_calls = !matches!(outcome, JobOutcome::AlreadyProcessed);

            match &outcome {
                JobOutcome::AlreadyProcessed => summary.already_processed += 1,
                JobOutcome::Rejected => summary.rejected += 1,
                JobOutcome::Failed(_) => summary.failed += 1,
                JobOutcome::Accepted(_) => {}
            }

            if let Some(bundle) = outcome.into_bundle() {
                let failures = deliver(&bundle, notifier, delays.between_messages).await;
                if failures == 0 {
                    summary.notified += 1;
                }
                summary.delivery_failures += failures;
            }

            let is_last = idx + 1 == jobs.len();
            if made_calls && !is_last && !delays.between_jobs.is_zero() {
                tokio::time::sleep(delays.between_jobs).await;
            }
        }

        info!(
            "Batch finished: {} jobs, {} notifications sent, {} already processed, {} rejected, {} failed",
            summary.total,
            summary.notified,
            summary.already_processed,
            summary.rejected,
            summary.failed
        );
        summary
    }
}

/// Sends every segment in order. Returns the number of segments that failed.
async fn deliver(bundle: &NotificationBundle, notifier: &dyn Notifier, pause: Duration) -> usize {
    let mut failures = 0;
    for (idx, segment) in bundle.segments.iter().enumerate() {
        if idx > 0 && !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }
        if let Err(e) = notifier.send(segment).await {
            warn!(
                "Failed to deliver segment {}/{} for {} via {}: {e}",
                idx + 1,
                bundle.segments.len(),
                bundle.job_url,
                notifier.name()
            );
            failures += 1;
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{ContentGenerator, ContentReviewer, LlmGenerator, LlmReviewer, LlmValidator};
    use crate::llm_client::LlmBackend;
    use crate::models::ReviewVerdict;
    use crate::testing::{
        sample_candidate, sample_job, RecordingNotifier, ScriptedGenerator, ScriptedLlm,
        ScriptedReviewer, StaticValidator,
    };

    struct Harness {
        _dir: tempfile::TempDir,
        pipeline: Pipeline,
        log: ProcessedJobLog,
        validator: Arc<StaticValidator>,
        generator: Arc<ScriptedGenerator>,
        reviewer: Arc<ScriptedReviewer>,
    }

    fn harness(validator: StaticValidator, verdicts: Vec<Result<ReviewVerdict, PipelineError>>) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let validator = Arc::new(validator);
        let generator = Arc::new(ScriptedGenerator::new());
        let reviewer = Arc::new(ScriptedReviewer::new(verdicts));
        let log = ProcessedJobLog::new(dir.path().join("processed_jobs.txt"));
        let pipeline = Pipeline::new(
            log.clone(),
            validator.clone(),
            GenerationLoop::new(generator.clone(), reviewer.clone()),
            sample_candidate(),
        );
        Harness {
            _dir: dir,
            pipeline,
            log,
            validator,
            generator,
            reviewer,
        }
    }

    fn log_lines(log: &ProcessedJobLog) -> Vec<String> {
        std::fs::read_to_string(log.path())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[tokio::test]
    async fn test_scenario_a_rejected_once_then_approved() {
        let h = harness(
            StaticValidator::accepting(),
            vec![
                Ok(ReviewVerdict::reject("too generic")),
                Ok(ReviewVerdict::approve("specific now")),
            ],
        );
        let job = sample_job("https://www.linkedin.com/jobs/view/100");

        let bundle = h.pipeline.process_job(&job).await.expect("bundle expected");

        assert_eq!(h.generator.call_count(), 2);
        assert_eq!(h.reviewer.call_count(), 2);
        assert_eq!(bundle.segments.len(), 3);
        assert!(bundle.segments[1].contains("suggestions v1"));
        assert_eq!(log_lines(&h.log), vec![job.url.clone()]);
    }

    #[tokio::test]
    async fn test_scenario_b_validation_rejects() {
        let h = harness(StaticValidator::rejecting(), vec![]);
        let job = sample_job("https://www.linkedin.com/jobs/view/200");

        assert!(h.pipeline.process_job(&job).await.is_none());
        assert_eq!(h.validator.call_count(), 1);
        assert_eq!(h.generator.call_count(), 0);
        assert_eq!(h.reviewer.call_count(), 0);
        assert!(log_lines(&h.log).is_empty());
    }

    #[tokio::test]
    async fn test_scenario_c_final_attempt_used_verbatim() {
        let h = harness(
            StaticValidator::accepting(),
            vec![
                Ok(ReviewVerdict::reject("too generic")),
                Ok(ReviewVerdict::reject("wrong company name")),
            ],
        );
        let job = sample_job("https://www.linkedin.com/jobs/view/300");

        let bundle = h.pipeline.process_job(&job).await.expect("bundle expected");

        assert_eq!(h.generator.call_count(), 3);
        assert_eq!(h.reviewer.call_count(), 2);
        assert!(bundle.segments[1].ends_with("suggestions v2"));
        assert!(bundle.segments[2].ends_with("letter v2"));
        assert_eq!(log_lines(&h.log), vec![job.url.clone()]);
    }

    #[tokio::test]
    async fn test_scenario_d_already_logged_makes_no_calls() {
        let h = harness(StaticValidator::accepting(), vec![]);
        let job = sample_job("https://www.linkedin.com/jobs/view/400");
        h.log.mark_processed(&job.url).await.unwrap();

        let outcome = h.pipeline.process_job_outcome(&job).await;

        assert_eq!(outcome, JobOutcome::AlreadyProcessed);
        assert_eq!(h.validator.call_count(), 0);
        assert_eq!(h.generator.call_count(), 0);
        assert_eq!(h.reviewer.call_count(), 0);
    }

    #[tokio::test]
    async fn test_same_url_twice_logged_once() {
        let h = harness(StaticValidator::accepting(), vec![]);
        let job = sample_job("https://www.linkedin.com/jobs/view/500");

        assert!(h.pipeline.process_job(&job).await.is_some());
        assert!(h.pipeline.process_job(&job).await.is_none());

        assert_eq!(log_lines(&h.log), vec![job.url.clone()]);
        assert_eq!(h.validator.call_count(), 1);
        assert_eq!(h.generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_validation_error_is_isolated() {
        let h = harness(StaticValidator::failing(), vec![]);
        let job = sample_job("https://www.linkedin.com/jobs/view/600");

        let outcome = h.pipeline.process_job_outcome(&job).await;

        assert!(matches!(outcome, JobOutcome::Failed(ref msg) if msg.contains("503")));
        assert_eq!(h.generator.call_count(), 0);
        assert!(log_lines(&h.log).is_empty());
    }

    #[tokio::test]
    async fn test_loop_error_does_not_mark_processed() {
        let h = harness(
            StaticValidator::accepting(),
            vec![Err(PipelineError::Llm(crate::llm_client::LlmError::EmptyContent))],
        );
        let job = sample_job("https://www.linkedin.com/jobs/view/700");

        assert!(h.pipeline.process_job(&job).await.is_none());
        assert!(log_lines(&h.log).is_empty());
    }

    #[tokio::test]
    async fn test_batch_continues_after_failures_and_counts() {
        let dir = tempfile::tempdir().unwrap();
        let log = ProcessedJobLog::new(dir.path().join("processed_jobs.txt"));
        log.mark_processed("https://www.linkedin.com/jobs/view/1").await.unwrap();

        // Replies consumed in order: job 2 validation (NO); job 3 validation (YES),
        // generation, review; job 4 validation hits an exhausted script → error.
        let llm = Arc::new(ScriptedLlm::new(vec![
            Ok("NO".to_string()),
            Ok("YES".to_string()),
            Ok("- tailor\n---SPLIT---\nDear team,".to_string()),
            Ok("YES\n---SPLIT---\nSolid.".to_string()),
        ]));
        let backend: Arc<dyn LlmBackend> = llm.clone();
        let generator: Arc<dyn ContentGenerator> = Arc::new(LlmGenerator::new(Some(backend.clone())));
        let reviewer: Arc<dyn ContentReviewer> = Arc::new(LlmReviewer::new(Some(backend.clone())));
        let pipeline = Pipeline::new(
            log.clone(),
            Arc::new(LlmValidator::new(Some(backend))),
            GenerationLoop::new(generator, reviewer),
            sample_candidate(),
        );
        let jobs: Vec<JobPosting> = (1..=4)
            .map(|n| sample_job(&format!("https://www.linkedin.com/jobs/view/{n}")))
            .collect();
        let notifier = RecordingNotifier::new();

        let summary = pipeline.run_batch(&jobs, &notifier, BatchDelays::default()).await;

        assert_eq!(
            summary,
            BatchSummary {
                total: 4,
                already_processed: 1,
                rejected: 1,
                failed: 1,
                notified: 1,
                delivery_failures: 0,
            }
        );
        assert_eq!(llm.call_count(), 5);
        let sent = notifier.sent();
        assert_eq!(sent.len(), 3);
        assert!(sent[0].contains("https://www.linkedin.com/jobs/view/3"));
        assert!(sent[1].ends_with("- tailor"));
        assert!(sent[2].ends_with("Dear team,"));
        assert!(log
            .is_processed("https://www.linkedin.com/jobs/view/3")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_delivery_failure_is_logged_not_fatal() {
        let h = harness(StaticValidator::accepting(), vec![]);
        let jobs = vec![
            sample_job("https://www.linkedin.com/jobs/view/800"),
            sample_job("https://www.linkedin.com/jobs/view/801"),
        ];
        let notifier = RecordingNotifier::failing_when_contains("Cover Letter");

        let summary = h.pipeline.run_batch(&jobs, &notifier, BatchDelays::default()).await;

        assert_eq!(summary.notified, 0);
        assert_eq!(summary.delivery_failures, 2);
        // Summary and suggestions still went out for both jobs.
        assert_eq!(notifier.sent().len(), 4);
        // Both jobs were recorded when accepted, before delivery.
        assert_eq!(log_lines(&h.log).len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_urls_in_one_batch_sent_once() {
        let h = harness(StaticValidator::accepting(), vec![]);
        let job = sample_job("https://www.linkedin.com/jobs/view/900");
        let jobs = vec![job.clone(), job];
        let notifier = RecordingNotifier::new();

        let summary = h.pipeline.run_batch(&jobs, &notifier, BatchDelays::default()).await;

        assert_eq!(summary.notified, 1);
        assert_eq!(summary.already_processed, 1);
        assert_eq!(notifier.sent().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_batch_sleeps_between_jobs() {
        let h = harness(StaticValidator::rejecting(), vec![]);
        let jobs = vec![
            sample_job("https://www.linkedin.com/jobs/view/1000"),
            sample_job("https://www.linkedin.com/jobs/view/1001"),
            sample_job("https://www.linkedin.com/jobs/view/1002"),
        ];
        let notifier = RecordingNotifier::new();
        let delays = BatchDelays {
            between_jobs: Duration::from_secs(5),
            between_messages: Duration::ZERO,
        };

        let started = tokio::time::Instant::now();
        let summary = h.pipeline.run_batch(&jobs, &notifier, delays).await;

        assert_eq!(summary.rejected, 3);
        // Two gaps between three jobs; none after the last.
        assert_eq!(started.elapsed(), Duration::from_secs(10));
    }
}
