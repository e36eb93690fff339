//! Gemini `streamGenerateContent` request body.

use compact_str::CompactString;
use llm::{Content, ContentBlock};
use serde::Serialize;
use serde_json::Value;

/// Gemini generate-content request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Conversation turns, ending with the submitted input.
    pub contents: Vec<GeminiContent>,
    /// Persistent system instruction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<GeminiContent>,
    /// Sampling configuration.
    pub generation_config: Value,
}

impl Request {
    /// Build the wire body from a gateway request.
    pub fn new(request: &llm::Request, generation_config: Value) -> Self {
        Self {
            contents: request
                .turns()
                .map(|turn| GeminiContent::new(Some(turn.role), &turn.content))
                .collect(),
            system_instruction: request
                .system
                .as_deref()
                .map(|system| GeminiContent::new(None, &Content::from(system))),
            generation_config,
        }
    }
}

/// A Gemini content entry: role plus parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeminiContent {
    /// `user` or `model`; absent for the system instruction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<CompactString>,
    /// Ordered content parts.
    pub parts: Vec<Part>,
}

impl GeminiContent {
    /// Convert gateway content into Gemini parts.
    ///
    /// Inline images become `inlineData`; remote image URLs cannot be sent
    /// inline and are skipped.
    pub fn new(role: Option<CompactString>, content: &Content) -> Self {
        let parts = match content {
            Content::Text(text) => vec![Part::Text { text: text.clone() }],
            Content::Blocks(blocks) => blocks.iter().filter_map(part).collect(),
        };
        Self { role, parts }
    }
}

/// One part of a Gemini content entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Part {
    /// Text part.
    Text {
        /// The text.
        text: String,
    },
    /// Inline binary data.
    InlineData {
        /// The payload.
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
}

/// Base64 payload with its media type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    /// Media type, e.g. `image/png`.
    pub mime_type: String,
    /// Base64 data.
    pub data: String,
}

impl Blob {
    /// Split a `data:<mime>;base64,<data>` URI.
    pub fn from_data_uri(uri: &str) -> Option<Self> {
        let (mime_type, data) = uri.strip_prefix("data:")?.split_once(";base64,")?;
        Some(Self {
            mime_type: mime_type.to_owned(),
            data: data.to_owned(),
        })
    }
}

fn part(block: &ContentBlock) -> Option<Part> {
    match block {
        ContentBlock::Text { text } => Some(Part::Text { text: text.clone() }),
        ContentBlock::ImageUrl { image_url } => match Blob::from_data_uri(&image_url.url) {
            Some(inline_data) => Some(Part::InlineData { inline_data }),
            None => {
                tracing::warn!(
                    "remote image URLs are not supported by gemini, skipping {}",
                    image_url.url
                );
                None
            }
        },
    }
}
