//! Telegram Bot API sink: plain-text `sendMessage` to one chat.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::TelegramConfig;
use crate::errors::PipelineError;
use crate::notifier::Notifier;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT_SECS: u64 = 30;
/// Telegram rejects messages over 4096 characters; stay under it.
const MAX_MESSAGE_CHARS: usize = 4000;

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    disable_web_page_preview: bool,
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Clone)]
pub struct TelegramNotifier {
    client: Client,
    bot_token: String,
    chat_id: String,
    api_base: String,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| PipelineError::Notify(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
            api_base: TELEGRAM_API_BASE.to_string(),
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_token)
    }

    async fn send_chunk(&self, text: &str) -> Result<(), PipelineError> {
        let response = self
            .client
            .post(self.send_message_url())
            .json(&SendMessageRequest {
                chat_id: &self.chat_id,
                text,
                disable_web_page_preview: true,
            })
            .send()
            .await
            // reqwest errors embed the URL, which contains the bot token
            .map_err(|e| PipelineError::Notify(format!("Telegram request failed: {}", e.without_url())))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<TelegramResponse>(&body).ok();

        match parsed {
            Some(r) if status.is_success() && r.ok => Ok(()),
            Some(r) => Err(PipelineError::Notify(format!(
                "Telegram returned {}: {}",
                status,
                r.description.unwrap_or_else(|| "no description".to_string())
            ))),
            None => Err(PipelineError::Notify(format!(
                "Telegram returned {status} with unparsable body: {body}"
            ))),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, message: &str) -> Result<(), PipelineError> {
        let chunks = chunk_message(message, MAX_MESSAGE_CHARS);
        for chunk in &chunks {
            self.send_chunk(chunk).await?;
        }
        if chunks.len() > 1 {
            debug!("Message split into {} Telegram chunks", chunks.len());
        }
        info!("Sent message to Telegram chat {}", self.chat_id);
        Ok(())
    }
}

/// Splits `text` into pieces of at most `limit` characters, preferring line breaks.
/// A single line longer than `limit` is hard-split on character boundaries.
fn chunk_message(text: &str, limit: usize) -> Vec<String> {
    if text.chars().count() <= limit {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();

        if current_len + line_len > limit && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len > limit {
            let chars: Vec<char> = line.chars().collect();
            for piece in chars.chunks(limit) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        current.push_str(line);
        current_len += line_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
