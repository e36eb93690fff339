//! Multi-turn generation command.

use anyhow::{Context, Result};
use clap::Args;
use model::GenerationGateway;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

/// Continue a conversation.
#[derive(Args, Debug)]
pub struct Chat {
    /// System prompt; overrides a system message in the history.
    #[arg(long, short, default_value = "")]
    pub system: String,

    /// JSON array of `{role, content}` messages, or `-` for stdin.
    pub history: PathBuf,
}

impl Chat {
    /// Stream the next assistant turn to stdout.
    pub async fn run(self, gateway: &GenerationGateway) -> Result<()> {
        let json = if self.history.as_os_str() == "-" {
            let mut json = String::new();
            tokio::io::stdin().read_to_string(&mut json).await?;
            json
        } else {
            tokio::fs::read_to_string(&self.history)
                .await
                .with_context(|| format!("failed to read {}", self.history.display()))?
        };

        let history = llm::parse_history(&json)?;
        tracing::debug!("loaded {} messages", history.len());
        super::print_stream(gateway.multiturn_generate_stream(&history, &self.system)).await
    }
}
