//! OpenAI-compatible chat completions request body.

use llm::Turn;
use serde::Serialize;
use serde_json::{Map, Value};

/// Role label of the system turn.
const SYSTEM_ROLE: &str = "system";

/// OpenAI-compatible streaming chat completions request body.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model identifier.
    pub model: String,
    /// The messages to send, system turn first.
    pub messages: Vec<Turn>,
    /// Always `true`; the gateway only streams.
    pub stream: bool,
    /// Temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Top-p sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Extra body parameters, merged at the top level.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Request {
    /// Build the wire body for `model` from a gateway request.
    pub fn new(model: &str, request: &llm::Request) -> Self {
        let messages = request
            .system
            .iter()
            .map(|system| Turn::new(SYSTEM_ROLE, system.as_str()))
            .chain(request.turns())
            .collect();
        let sampling = &request.sampling;
        Self {
            model: model.to_owned(),
            messages,
            stream: true,
            temperature: sampling.temperature,
            top_p: sampling.top_p,
            max_tokens: sampling.max_tokens,
            extra: sampling.extra.clone(),
        }
    }
}
