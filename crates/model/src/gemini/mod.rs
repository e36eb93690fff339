//! Google Gemini provider.
//!
//! Uses the `streamGenerateContent` endpoint through a blocking HTTP
//! client: the call and the chunk iterator occupy the calling thread for
//! the whole generation, so the gateway runs them on a worker thread.

use crate::config::GeminiConfig;
pub use provider::Chunks;
pub use request::{Blob, GeminiContent, Part, Request};
pub use response::Response;
use std::sync::Arc;

mod provider;
mod request;
mod response;

/// The public Gemini API base URL.
pub const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// The Gemini provider.
#[derive(Clone)]
pub struct Gemini {
    inner: Arc<Inner>,
}

struct Inner {
    /// Resolved streaming endpoint (`...:streamGenerateContent?alt=sse`).
    endpoint: String,
    /// Provider configuration, API key resolved.
    config: GeminiConfig,
}

impl Gemini {
    /// Create a provider from its configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let base = config
            .base_url
            .as_deref()
            .unwrap_or(BASE_URL)
            .trim_end_matches('/');
        let endpoint = format!(
            "{base}/models/{}:streamGenerateContent?alt=sse",
            config.model
        );
        Self {
            inner: Arc::new(Inner { endpoint, config }),
        }
    }

    /// The model identifier.
    pub fn model(&self) -> &str {
        &self.inner.config.model
    }

    /// The resolved streaming endpoint.
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }
}
