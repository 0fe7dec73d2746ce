mod agents;
mod cli;
mod config;
mod dedup;
mod errors;
mod jobs;
mod llm_client;
mod models;
mod notifier;
mod pipeline;
mod state;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, info_span, Instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::dedup::ProcessedJobLog;
use crate::jobs::posting::canonical_job_url;
use crate::jobs::{JobSource, JsonFileSource};
use crate::models::CandidateProfile;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting scout v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Run { jobs, console } => run(config, jobs, console).await,
        Command::Status => status(&config).await,
        Command::Seen { url } => seen(&config, &url).await,
    }
}

async fn run(mut config: Config, jobs_file: Option<std::path::PathBuf>, console: bool) -> Result<()> {
    if let Some(path) = jobs_file {
        config.jobs_file = path;
    }

    let candidate = CandidateProfile::load(
        &config.ideal_profile,
        &config.resume,
        &config.writing_samples_dir,
    )
    .await?;

    let jobs = JsonFileSource::new(&config.jobs_file)
        .fetch()
        .await
        .context("Failed to load job postings")?;

    if jobs.is_empty() {
        info!("No jobs found in {}. Exiting.", config.jobs_file.display());
        return Ok(());
    }

    let state = AppState::new(config, candidate, console)?;
    let delays = state.delays();

    let span = info_span!("batch", run_id = %Uuid::new_v4());
    let summary = state
        .pipeline
        .run_batch(&jobs, state.notifier.as_ref(), delays)
        .instrument(span)
        .await;

    info!(
        "scout finished: {} notification(s) sent out of {} job(s)",
        summary.notified, summary.total
    );
    Ok(())
}

async fn status(config: &Config) -> Result<()> {
    let log = ProcessedJobLog::new(&config.processed_log);
    let count = log.processed_count().await?;
    println!("{} job(s) already sent ({})", count, log.path().display());
    Ok(())
}

async fn seen(config: &Config, url: &str) -> Result<()> {
    let canonical = canonical_job_url(url).map_err(anyhow::Error::msg)?;
    let log = ProcessedJobLog::new(&config.processed_log);
    if log.is_processed(&canonical).await? {
        println!("seen: {canonical}");
    } else {
        println!("new: {canonical}");
    }
    Ok(())
}
