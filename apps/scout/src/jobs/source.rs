//! Job sources: produce normalized postings in the order they should be processed.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::PipelineError;
use crate::jobs::posting::{JobPosting, RawJobRecord};

/// A producer of job postings. Order of the returned list is processing order.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<JobPosting>, PipelineError>;
}

/// Reads scraped records from a JSON file.
///
/// Accepts either a JSON array of records or JSON lines (one record per line).
/// Records that fail normalization are skipped with a warning.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl JobSource for JsonFileSource {
    async fn fetch(&self) -> Result<Vec<JobPosting>, PipelineError> {
        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            PipelineError::Source(format!("cannot read {}: {e}", self.path.display()))
        })?;

        let values = parse_records(&text)?;
        let total = values.len();
        let jobs: Vec<JobPosting> = values
            .into_iter()
            .enumerate()
            .filter_map(|(idx, value)| match normalize_record(value) {
                Ok(job) => Some(job),
                Err(reason) => {
                    warn!("Skipping job record #{idx}: {reason}");
                    None
                }
            })
            .collect();

        info!(
            "Loaded {}/{} job records from {}",
            jobs.len(),
            total,
            self.path.display()
        );
        Ok(jobs)
    }
}

fn parse_records(text: &str) -> Result<Vec<Value>, PipelineError> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str::<Vec<Value>>(trimmed)
            .map_err(|e| PipelineError::Source(format!("invalid JSON array: {e}")));
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str::<Value>(line)
                .map_err(|e| PipelineError::Source(format!("invalid JSON on line {}: {e}", n + 1)))
        })
        .collect()
}

fn normalize_record(value: Value) -> Result<JobPosting, String> {
    let raw: RawJobRecord = serde_json::from_value(value).map_err(|e| e.to_string())?;
    JobPosting::from_raw(raw)
}
