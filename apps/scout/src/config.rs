use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Built once in `main` and passed by reference; nothing reads the environment later.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absent key → agents fall back to their safe defaults.
    pub openrouter_api_key: Option<String>,
    pub telegram: Option<TelegramConfig>,
    pub jobs_file: PathBuf,
    pub processed_log: PathBuf,
    pub ideal_profile: PathBuf,
    pub resume: PathBuf,
    pub writing_samples_dir: PathBuf,
    pub job_delay: Duration,
    pub message_delay: Duration,
    pub rust_log: String,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let telegram = match (optional_env("TELEGRAM_BOT_TOKEN"), optional_env("TELEGRAM_CHAT_ID")) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramConfig { bot_token, chat_id }),
            _ => None,
        };

        Ok(Config {
            openrouter_api_key: optional_env("OPENROUTER_API_KEY"),
            telegram,
            jobs_file: path_env("SCOUT_JOBS_FILE", "jobs.json"),
            processed_log: path_env("SCOUT_PROCESSED_LOG", "processed_jobs.txt"),
            ideal_profile: path_env("SCOUT_IDEAL_PROFILE", "ideal_job_profile.txt"),
            resume: path_env("SCOUT_RESUME", "resume.json"),
            writing_samples_dir: path_env("SCOUT_WRITING_SAMPLES", "writing_style_samples"),
            job_delay: Duration::from_secs(
                parse_env("SCOUT_JOB_DELAY_SECS", 5)
                    .context("SCOUT_JOB_DELAY_SECS must be a whole number of seconds")?,
            ),
            message_delay: Duration::from_millis(
                parse_env("SCOUT_MESSAGE_DELAY_MS", 1000)
                    .context("SCOUT_MESSAGE_DELAY_MS must be a whole number of milliseconds")?,
            ),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads a variable, treating unset and blank the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn path_env(key: &str, default: &str) -> PathBuf {
    PathBuf::from(optional_env(key).unwrap_or_else(|| default.to_string()))
}

fn parse_env(key: &str, default: u64) -> Result<u64> {
    match optional_env(key) {
        Some(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("Invalid value '{raw}' for {key}")),
        None => Ok(default),
    }
}
