//! Generation backends and the gateway facade.
//!
//! Two provider families with different calling conventions sit behind one
//! gateway: OpenAI-compatible chat completions, streamed natively over SSE
//! on the async runtime, and Gemini, driven through a blocking HTTP client
//! whose output is bridged from a worker thread.

pub use adapter::{Adapter, Bridge, Bridged, Direct, Phase};
pub use config::{BackendConfig, BackendKind, GatewayConfig, GeminiConfig, OpenAIConfig};
pub use gateway::GenerationGateway;
pub use gemini::Gemini;
pub use http::HttpProvider;
pub use openai::OpenAI;
pub use reqwest::{self, Client};

pub mod adapter;
pub mod config;
mod gateway;
pub mod gemini;
mod http;
pub mod openai;
pub mod sse;
