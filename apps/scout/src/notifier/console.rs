use async_trait::async_trait;
use tracing::info;

use crate::errors::PipelineError;
use crate::notifier::Notifier;

/// Prints messages to stdout. Used when Telegram credentials are not configured
/// or when `--console` is passed.
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    fn name(&self) -> &'static str {
        "console"
    }

    async fn send(&self, message: &str) -> Result<(), PipelineError> {
        println!("--- scout notification ---\n{message}\n--------------------------");
        info!("Printed notification ({} chars) to console", message.chars().count());
        Ok(())
    }
}
