//! Dedup gate: the persisted set of job URLs that have already been sent.
//!
//! Storage is a plain text file, one URL per line, append-only. A missing file
//! is an empty set; it is created on the first `mark_processed`.
//! Single-writer only: there is no locking around the append.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::errors::PipelineError;

#[derive(Debug, Clone)]
pub struct ProcessedJobLog {
    path: PathBuf,
}

impl ProcessedJobLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole log into a set. Blank lines are ignored.
    pub async fn load(&self) -> Result<HashSet<String>, PipelineError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashSet::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    pub async fn is_processed(&self, url: &str) -> Result<bool, PipelineError> {
        Ok(self.load().await?.contains(url))
    }

    /// Appends `url` as a new line. Does not check for an existing entry;
    /// duplicates are harmless because membership is over all lines.
    pub async fn mark_processed(&self, url: &str) -> Result<(), PipelineError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{url}\n").as_bytes()).await?;
        file.flush().await?;

        debug!("Recorded {url} in {}", self.path.display());
        Ok(())
    }

    /// Number of distinct URLs recorded so far.
    pub async fn processed_count(&self) -> Result<usize, PipelineError> {
        Ok(self.load().await?.len())
    }
}
