//! Sampling configuration for a generation call

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sampling parameters shared by every call of a gateway.
///
/// Recognized options are typed; anything else goes into `extra` and is
/// forwarded verbatim to providers that accept free-form body fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SamplingParams {
    /// Sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Nucleus sampling probability mass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    /// Maximum number of output tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Provider-specific extra body parameters.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}
