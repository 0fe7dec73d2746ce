use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::agents::{GenerationLoop, LlmGenerator, LlmReviewer, LlmValidator};
use crate::config::Config;
use crate::dedup::ProcessedJobLog;
use crate::llm_client::{LlmBackend, LlmClient};
use crate::models::CandidateProfile;
use crate::notifier::{ConsoleNotifier, Notifier, TelegramNotifier};
use crate::pipeline::{BatchDelays, Pipeline};

/// Everything a run needs, wired once from `Config`.
pub struct AppState {
    pub config: Config,
    pub pipeline: Pipeline,
    /// Telegram when configured, console otherwise.
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(config: Config, candidate: CandidateProfile, force_console: bool) -> Result<Self> {
        let llm: Option<Arc<dyn LlmBackend>> = match &config.openrouter_api_key {
            Some(key) => {
                let client: Arc<dyn LlmBackend> = Arc::new(LlmClient::new(key.clone())?);
                info!("LLM client initialized (OpenRouter)");
                Some(client)
            }
            None => {
                warn!("OPENROUTER_API_KEY not set: validation will reject every job");
                None
            }
        };

        let workflow = GenerationLoop::new(
            Arc::new(LlmGenerator::new(llm.clone())),
            Arc::new(LlmReviewer::new(llm.clone())),
        );
        let pipeline = Pipeline::new(
            ProcessedJobLog::new(&config.processed_log),
            Arc::new(LlmValidator::new(llm)),
            workflow,
            candidate,
        );

        let notifier: Arc<dyn Notifier> = match (&config.telegram, force_console) {
            (Some(telegram), false) => Arc::new(TelegramNotifier::new(telegram)?),
            (None, false) => {
                warn!("Telegram credentials (TELEGRAM_BOT_TOKEN, TELEGRAM_CHAT_ID) not fully set: printing to console");
                Arc::new(ConsoleNotifier)
            }
            (_, true) => Arc::new(ConsoleNotifier),
        };
        info!("Notification sink: {}", notifier.name());

        Ok(Self {
            config,
            pipeline,
            notifier,
        })
    }

    pub fn delays(&self) -> BatchDelays {
        BatchDelays {
            between_jobs: self.config.job_delay,
            between_messages: self.config.message_delay,
        }
    }
}
