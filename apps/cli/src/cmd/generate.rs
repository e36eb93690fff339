//! Single-turn generation command.

use anyhow::Result;
use clap::Args;
use llm::Prompt;
use model::GenerationGateway;

/// Generate from a single prompt.
#[derive(Args, Debug)]
pub struct Generate {
    /// System prompt.
    #[arg(long, short, default_value = "")]
    pub system: String,

    /// Image path or URL. Repeat to attach several images.
    #[arg(long = "image", short)]
    pub images: Vec<String>,

    /// Marker in the prompt where images are placed, e.g. `<image>`.
    #[arg(long)]
    pub tag: Option<String>,

    /// Prompt text.
    pub prompt: String,
}

impl Generate {
    /// Stream the response to stdout.
    pub async fn run(self, gateway: &GenerationGateway) -> Result<()> {
        let prompts = [Prompt::from(self.prompt)];
        let images = [self.images];
        let tokens =
            gateway.generate_stream(&prompts, &self.system, &images, self.tag.as_deref())?;
        super::print_stream(tokens).await
    }
}
