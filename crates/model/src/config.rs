//! Gateway configuration loaded from TOML.
//!
//! The backend section is discriminated by its `provider` field, so all
//! provider settings sit at the same level:
//!
//! ```toml
//! prompt_mode = "strict"
//!
//! [backend]
//! provider = "gemini"
//! model = "gemini-3-pro-preview"
//! api_key = "${GOOGLE_API_KEY}"
//!
//! [sampling]
//! temperature = 0.7
//! ```

use anyhow::Context;
use compact_str::CompactString;
use llm::{Error, PromptMode, SamplingParams};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::{path::Path, time::Duration};

/// Environment fallback for the OpenAI-compatible API key.
pub const OPENAI_KEY_ENV: &str = "LLM_API_KEY";
/// Environment fallback for the Gemini API key.
pub const GEMINI_KEY_ENV: &str = "GOOGLE_API_KEY";
/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-pro-preview";
/// Default per-attempt wait of the bridged consumer, in seconds.
pub const DEFAULT_BRIDGE_WAIT_SECS: u64 = 60;

/// Top-level gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// The generation backend. Required before the gateway can be built.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendConfig>,
    /// Sampling parameters applied to every call.
    #[serde(default)]
    pub sampling: SamplingParams,
    /// Treatment of unrecognized prompt shapes.
    #[serde(default)]
    pub prompt_mode: PromptMode,
    /// Per-attempt wait of the bridged consumer, in seconds.
    #[serde(default = "default_bridge_wait")]
    pub bridge_wait_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            backend: None,
            sampling: SamplingParams::default(),
            prompt_mode: PromptMode::default(),
            bridge_wait_secs: DEFAULT_BRIDGE_WAIT_SECS,
        }
    }
}

fn default_bridge_wait() -> u64 {
    DEFAULT_BRIDGE_WAIT_SECS
}

impl GatewayConfig {
    /// Parse a TOML string, expanding `${ENV_VAR}` references first.
    pub fn from_toml(toml_str: &str) -> anyhow::Result<Self> {
        let expanded = expand_env(toml_str);
        let config: Self = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// The validated backend configuration, with API keys resolved.
    pub fn backend(&self) -> llm::Result<BackendConfig> {
        let backend = self
            .backend
            .as_ref()
            .ok_or_else(|| Error::BackendNotInitialized {
                backend: "none",
                reason: "no [backend] section configured".into(),
            })?;
        backend.resolve()
    }

    /// The bridged consumer's per-attempt wait.
    pub fn bridge_wait(&self) -> Duration {
        Duration::from_secs(self.bridge_wait_secs.max(1))
    }
}

/// Substitute `${VAR}` references from the environment.
///
/// Unset variables expand to nothing and are logged, so a missing API key
/// shows up as a warning rather than as an anonymous request. An
/// unterminated `${` is kept as written.
fn expand_env(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 2..];
        let Some(end) = tail.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &tail[..end];
        match std::env::var(name) {
            Ok(value) => out.push_str(&value),
            Err(_) => tracing::warn!("config references unset environment variable {name}"),
        }
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    out
}

/// How a backend delivers its stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Natively asynchronous stream, consumed on the caller's runtime.
    DirectStream,
    /// Blocking iterator stream, bridged from a worker thread.
    BridgedStream,
}

/// Provider-specific configuration, discriminated by the `provider` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum BackendConfig {
    /// OpenAI-compatible chat completions API.
    #[serde(rename = "openai")]
    OpenAI(OpenAIConfig),
    /// Google Gemini API.
    Gemini(GeminiConfig),
}

impl BackendConfig {
    /// Provider name as written in the configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAI(_) => "openai",
            Self::Gemini(_) => "gemini",
        }
    }

    /// Stream delivery kind of this backend.
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::OpenAI(_) => BackendKind::DirectStream,
            Self::Gemini(_) => BackendKind::BridgedStream,
        }
    }

    /// Model identifier.
    pub fn model(&self) -> &str {
        match self {
            Self::OpenAI(c) => &c.model,
            Self::Gemini(c) => &c.model,
        }
    }

    /// Validate and fill API keys from the environment.
    fn resolve(&self) -> llm::Result<Self> {
        let backend = self.name();
        let missing = |reason: &str| Error::BackendNotInitialized {
            backend,
            reason: reason.to_owned(),
        };

        if self.model().trim().is_empty() {
            return Err(missing("model identifier is required"));
        }

        match self {
            Self::OpenAI(config) => Ok(Self::OpenAI(OpenAIConfig {
                api_key: key_or_env(&config.api_key, OPENAI_KEY_ENV),
                ..config.clone()
            })),
            Self::Gemini(config) => {
                let api_key = key_or_env(&config.api_key, GEMINI_KEY_ENV);
                if api_key.is_empty() {
                    return Err(missing(
                        "api key required; set GOOGLE_API_KEY or backend.api_key",
                    ));
                }
                Ok(Self::Gemini(GeminiConfig {
                    api_key,
                    ..config.clone()
                }))
            }
        }
    }
}

fn key_or_env(key: &str, var: &str) -> String {
    if key.trim().is_empty() {
        std::env::var(var).unwrap_or_default()
    } else {
        key.to_owned()
    }
}

/// Configuration for OpenAI-compatible endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OpenAIConfig {
    /// Model identifier sent with every request.
    #[serde(default)]
    pub model: CompactString,
    /// API key; falls back to `LLM_API_KEY`. Empty means no auth header.
    #[serde(default)]
    pub api_key: String,
    /// Base URL (e.g. `http://localhost:8000/v1`) or full chat completions
    /// endpoint. Defaults to the OpenAI API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Configuration for the Gemini API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model identifier.
    #[serde(default = "default_gemini_model")]
    pub model: CompactString,
    /// API key; falls back to `GOOGLE_API_KEY`. Required.
    #[serde(default)]
    pub api_key: String,
    /// API base URL. Defaults to the public v1beta endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Gemini `generationConfig`, sent verbatim. Derived from the sampling
    /// parameters when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<Map<String, Value>>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            api_key: String::new(),
            base_url: None,
            generation_config: None,
        }
    }
}

fn default_gemini_model() -> CompactString {
    CompactString::const_new(DEFAULT_GEMINI_MODEL)
}

impl GeminiConfig {
    /// The `generationConfig` to send: the configured one, or one derived
    /// from `sampling` with Gemini's usual defaults.
    pub fn generation_config(&self, sampling: &SamplingParams) -> Value {
        match &self.generation_config {
            Some(config) => Value::Object(config.clone()),
            None => json!({
                "temperature": sampling.temperature.unwrap_or(0.7),
                "topP": sampling.top_p.unwrap_or(0.8),
                "maxOutputTokens": sampling.max_tokens.unwrap_or(2048),
            }),
        }
    }
}
