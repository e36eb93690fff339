//! OpenAI-compatible chat completions provider.
//!
//! Covers the OpenAI API itself and any server speaking the same protocol
//! (vLLM, Ollama, LiteLLM). Streams natively over SSE on the async runtime.

use crate::{HttpProvider, config::OpenAIConfig};
use compact_str::CompactString;
pub use request::Request;
use reqwest::Client;

mod provider;
mod request;

/// The OpenAI chat completions endpoint.
pub const ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Path appended to base URLs that do not already name the endpoint.
const COMPLETIONS_PATH: &str = "/chat/completions";

/// The OpenAI-compatible provider.
#[derive(Clone)]
pub struct OpenAI {
    /// SSE transport with auth headers.
    http: HttpProvider,
    /// Model identifier sent with every request.
    model: CompactString,
}

impl OpenAI {
    /// Create a provider from its configuration.
    ///
    /// An empty API key sends no `Authorization` header.
    pub fn new(client: Client, config: &OpenAIConfig) -> anyhow::Result<Self> {
        let endpoint = config
            .base_url
            .as_deref()
            .map_or_else(|| ENDPOINT.to_owned(), endpoint);
        let http = if config.api_key.is_empty() {
            HttpProvider::no_auth(client, &endpoint)
        } else {
            HttpProvider::bearer(client, &config.api_key, &endpoint)?
        };
        Ok(Self {
            http,
            model: config.model.clone(),
        })
    }

    /// The model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The resolved chat completions endpoint.
    pub fn endpoint(&self) -> &str {
        self.http.endpoint()
    }
}

/// Resolve a base URL into the chat completions endpoint.
fn endpoint(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.ends_with(COMPLETIONS_PATH) {
        base.to_owned()
    } else {
        format!("{base}{COMPLETIONS_PATH}")
    }
}
