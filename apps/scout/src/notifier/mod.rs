//! Notification sinks. A sink delivers one plain-text message at a time to a
//! single destination; it does not retry.

use async_trait::async_trait;

use crate::errors::PipelineError;

pub mod console;
pub mod telegram;

pub use console::ConsoleNotifier;
pub use telegram::TelegramNotifier;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Human-readable sink name for logs.
    fn name(&self) -> &'static str;

    async fn send(&self, message: &str) -> Result<(), PipelineError>;
}
