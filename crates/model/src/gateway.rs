//! The generation gateway.
//!
//! One entry point for single-turn, multimodal and multi-turn generation.
//! Prompt normalization and image resolution happen up front, so their
//! errors are returned before any output; provider failures arrive in-band
//! as the last token of the stream.

use crate::{
    Adapter, BackendConfig, BackendKind, Bridged, Direct, Gemini, GatewayConfig, OpenAI,
};
use async_stream::stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{Error, Message, Prompt, PromptMode, Result};
use reqwest::Client;

/// Facade over the configured backend adapter.
#[derive(Clone)]
pub struct GenerationGateway {
    adapter: Adapter,
    prompt_mode: PromptMode,
}

impl GenerationGateway {
    /// Create a gateway over an already built adapter.
    pub fn new(adapter: Adapter, prompt_mode: PromptMode) -> Self {
        Self {
            adapter,
            prompt_mode,
        }
    }

    /// Build the gateway from configuration.
    ///
    /// Fails with [`Error::BackendNotInitialized`] when the backend section
    /// is missing or incomplete.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let backend = config.backend()?;
        let (name, model) = (backend.name(), backend.model().to_owned());
        let sampling = config.sampling.clone();

        let adapter = match backend {
            BackendConfig::OpenAI(openai) => {
                let provider = OpenAI::new(Client::new(), &openai).map_err(|e| {
                    Error::BackendNotInitialized {
                        backend: name,
                        reason: format!("{e:#}"),
                    }
                })?;
                Adapter::Direct(Direct::new(provider, sampling))
            }
            BackendConfig::Gemini(gemini) => Adapter::Bridged(
                Bridged::new(Gemini::new(gemini), sampling).with_wait(config.bridge_wait()),
            ),
        };

        tracing::info!("generation gateway ready: backend={name}, model={model}");
        Ok(Self::new(adapter, config.prompt_mode))
    }

    /// Stream delivery kind of the configured backend.
    pub fn backend_kind(&self) -> BackendKind {
        self.adapter.kind()
    }

    /// Treatment of unrecognized prompt shapes.
    pub fn prompt_mode(&self) -> PromptMode {
        self.prompt_mode
    }

    /// The configured adapter.
    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    /// Stream a single-turn generation.
    ///
    /// Only the first prompt is used, together with the first image list.
    /// Image references are trimmed and blanks are dropped. With a `tag`,
    /// images are placed at its occurrences in the prompt text and only as
    /// many as there are occurrences are resolved before the call. No prompts yield an empty stream.
    pub fn generate_stream<S: AsRef<str>>(
        &self,
        prompts: &[Prompt],
        system_prompt: &str,
        images: &[Vec<S>],
        tag: Option<&str>,
    ) -> Result<impl Stream<Item = String> + Send + use<S>> {
        let texts = llm::normalize(prompts, self.prompt_mode)?;
        if texts.len() > 1 {
            tracing::debug!("generate_stream uses the first of {} prompts", texts.len());
        }

        let input = match texts.into_iter().next() {
            Some(text) => {
                let listed = images.first().map(Vec::as_slice).unwrap_or_default();
                let urls = resolve_images(listed, llm::multimodal::image_slots(&text, tag))?;
                Some(llm::user_content(&text, &urls, tag))
            }
            None => None,
        };

        let adapter = self.adapter.clone();
        let system = system(system_prompt).map(str::to_owned);
        Ok(stream! {
            if let Some(input) = input {
                let mut tokens = std::pin::pin!(adapter.generate(system.as_deref(), input));
                while let Some(token) = tokens.next().await {
                    yield token;
                }
            }
        })
    }

    /// Stream a multi-turn generation. An empty history yields nothing.
    ///
    /// A non-blank `system_prompt` overrides the history's system message.
    pub fn multiturn_generate_stream(
        &self,
        history: &[Message],
        system_prompt: &str,
    ) -> impl Stream<Item = String> + Send + use<> {
        if history.is_empty() {
            tracing::debug!("empty history, nothing to generate");
        }
        self.adapter.multiturn(history, system(system_prompt))
    }

    /// Generate a full response for every prompt, in order.
    pub async fn generate(&self, prompts: &[Prompt], system_prompt: &str) -> Result<Vec<String>> {
        let texts = llm::normalize(prompts, self.prompt_mode)?;
        let mut responses = Vec::with_capacity(texts.len());
        for text in texts {
            let tokens: Vec<String> = self
                .adapter
                .generate(system(system_prompt), text.into())
                .collect()
                .await;
            responses.push(tokens.concat());
        }
        Ok(responses)
    }

    /// Collect a multi-turn generation. An empty history returns nothing.
    pub async fn multiturn_generate(&self, history: &[Message], system_prompt: &str) -> Vec<String> {
        self.multiturn_generate_stream(history, system_prompt)
            .collect()
            .await
    }
}

fn system(prompt: &str) -> Option<&str> {
    Some(prompt).filter(|p| !p.trim().is_empty())
}

/// Resolve the non-blank images the layout will place, at most `slots`.
fn resolve_images<S: AsRef<str>>(images: &[S], slots: Option<usize>) -> Result<Vec<String>> {
    images
        .iter()
        .map(|image| image.as_ref().trim())
        .filter(|image| !image.is_empty())
        .take(slots.unwrap_or(usize::MAX))
        .map(llm::image::resolve)
        .collect()
}
