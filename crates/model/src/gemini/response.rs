//! Gemini streaming response chunks.

use compact_str::CompactString;
use llm::{Choice, Delta, StreamChunk};
use serde::Deserialize;

/// One `streamGenerateContent` event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Response candidates; the first one is used.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Model version that produced the chunk.
    #[serde(default)]
    pub model_version: Option<CompactString>,
    /// Error reported in place of a chunk.
    #[serde(default)]
    pub error: Option<ApiError>,
}

/// A response candidate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Candidate content.
    #[serde(default)]
    pub content: Option<CandidateContent>,
    /// Why generation stopped.
    #[serde(default)]
    pub finish_reason: Option<CompactString>,
}

/// Content of a candidate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    /// Parts of the content.
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

/// A response part; only text is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsePart {
    /// Text, if this is a text part.
    #[serde(default)]
    pub text: Option<String>,
    /// Whether this part is model reasoning rather than answer text.
    #[serde(default)]
    pub thought: bool,
}

/// Error object returned by the API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    /// HTTP-like status code.
    #[serde(default)]
    pub code: u16,
    /// Human readable message.
    #[serde(default)]
    pub message: String,
}

impl Response {
    /// Answer text of the first candidate, reasoning parts excluded.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter(|p| !p.thought)
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Convert into the unified chunk shape.
    pub fn into_chunk(self) -> StreamChunk {
        let text = self.text();
        let finish_reason = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.finish_reason);
        StreamChunk {
            model: self.model_version.unwrap_or_default(),
            choices: vec![Choice {
                delta: Delta {
                    content: Some(text),
                },
                finish_reason,
                ..Default::default()
            }],
            ..Default::default()
        }
    }
}
