use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "scout")]
#[command(about = "Filter job postings with an LLM, draft tailored applications, send them to Telegram")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Process a file of scraped job postings
    Run {
        /// JSON array or JSON-lines file of postings (overrides SCOUT_JOBS_FILE)
        #[arg(long)]
        jobs: Option<PathBuf>,
        /// Print notifications instead of sending them to Telegram
        #[arg(long)]
        console: bool,
    },
    /// Show how many jobs have already been sent
    Status,
    /// Check whether a job URL has already been sent
    Seen { url: String },
}
