use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, warn};

/// Everything the agents know about the candidate. Loaded once at startup.
#[derive(Debug, Clone)]
pub struct CandidateProfile {
    /// Free-text acceptance criteria, passed verbatim to validation.
    pub ideal_profile: String,
    /// Structured resume data, passed pretty-printed to generation.
    pub resume: Value,
    /// Prose samples whose voice the cover letter should emulate.
    pub writing_samples: Vec<String>,
}

impl CandidateProfile {
    pub async fn load(ideal_profile: &Path, resume: &Path, samples_dir: &Path) -> Result<Self> {
        let ideal_profile = tokio::fs::read_to_string(ideal_profile)
            .await
            .with_context(|| format!("Failed to read ideal profile {}", ideal_profile.display()))?;

        let resume_text = tokio::fs::read_to_string(resume)
            .await
            .with_context(|| format!("Failed to read resume {}", resume.display()))?;
        let resume: Value = serde_json::from_str(&resume_text)
            .with_context(|| format!("Resume {} is not valid JSON", resume.display()))?;

        let writing_samples = load_writing_samples(samples_dir).await?;
        info!(
            "Candidate profile loaded ({} writing samples)",
            writing_samples.len()
        );

        Ok(Self {
            ideal_profile,
            resume,
            writing_samples,
        })
    }

    pub fn resume_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.resume).unwrap_or_else(|_| self.resume.to_string())
    }
}

/// Reads every regular file in `dir`, sorted by file name. A missing directory
/// means "no samples".
async fn load_writing_samples(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        warn!(
            "Writing samples directory {} not found; continuing without samples",
            dir.display()
        );
        return Ok(Vec::new());
    }

    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read {}", dir.display()))?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    let mut samples = Vec::with_capacity(files.len());
    for path in files {
        let text = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read writing sample {}", path.display()))?;
        if !text.trim().is_empty() {
            samples.push(text.trim().to_string());
        }
    }
    Ok(samples)
}
