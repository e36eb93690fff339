//! CLI argument parsing and command dispatch.

use crate::config;
use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use futures_core::Stream;
use futures_util::StreamExt;
use model::GenerationGateway;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

pub use chat::Chat;
pub use generate::Generate;

mod chat;
mod generate;

/// Stream text from a configured generation backend.
#[derive(Parser, Debug)]
#[command(name = "genway", about = "Stream text from a configured generation backend")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Path to genway.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate from a single prompt, optionally with images.
    Generate(Generate),
    /// Continue a conversation read from a JSON file.
    Chat(Chat),
}

impl Cli {
    /// Resolve configuration, build the gateway and run the command.
    pub async fn run(self) -> Result<()> {
        let config = config::resolve_config(self.config.as_deref())?;
        let gateway = GenerationGateway::from_config(&config)?;
        match self.command {
            Command::Generate(cmd) => cmd.run(&gateway).await,
            Command::Chat(cmd) => cmd.run(&gateway).await,
        }
    }
}

/// Write tokens to stdout as they arrive.
///
/// Fails after the stream ends if the last token was an error marker.
async fn print_stream(tokens: impl Stream<Item = String>) -> Result<()> {
    let mut tokens = std::pin::pin!(tokens);
    let mut stdout = tokio::io::stdout();
    let mut failed = false;
    while let Some(token) = tokens.next().await {
        failed = llm::is_error_text(&token);
        stdout.write_all(token.as_bytes()).await?;
        stdout.flush().await?;
    }
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;

    if failed {
        bail!("generation failed");
    }
    Ok(())
}
