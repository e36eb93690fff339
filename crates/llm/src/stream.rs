//! Streaming response abstractions for the unified generation interface
//!
//! Failures are reported in-band: a failed call ends with one text token of
//! the form `"\n[Error: <message>]"`. Consumers that need to tell failures
//! apart match on that marker with [`is_error_text`].

use compact_str::CompactString;
use serde::Deserialize;
use std::fmt::Display;

/// Leading part of the in-band error marker.
pub const ERROR_PREFIX: &str = "\n[Error: ";

/// Format an error as the in-band marker token.
pub fn error_text(error: impl Display) -> String {
    format!("{ERROR_PREFIX}{error}]")
}

/// Whether a token is an in-band error marker.
pub fn is_error_text(token: &str) -> bool {
    token.starts_with(ERROR_PREFIX) && token.ends_with(']')
}

/// A streaming chat completion chunk
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StreamChunk {
    /// Completion id.
    #[serde(default)]
    pub id: CompactString,

    /// Model that produced the chunk.
    #[serde(default)]
    pub model: CompactString,

    /// The list of completion choices (with delta content)
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl StreamChunk {
    /// Create a chunk carrying a text delta.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice {
                delta: Delta {
                    content: Some(content.into()),
                },
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    /// Get the non-empty content of the first choice
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.delta.content.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Get the reason the model stopped generating
    pub fn reason(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.finish_reason.as_deref())
    }
}

/// A completion choice
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Choice {
    /// Index of the choice.
    #[serde(default)]
    pub index: u32,

    /// Incremental content.
    #[serde(default)]
    pub delta: Delta,

    /// Why generation stopped, on the final chunk.
    #[serde(default)]
    pub finish_reason: Option<CompactString>,
}

/// Incremental message content
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Delta {
    /// Text delta.
    #[serde(default)]
    pub content: Option<String>,
}

/// A unit on the handoff queue between a blocking worker and its consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamToken {
    /// A text delta.
    Text(String),
    /// A formatted in-band error marker.
    Error(String),
    /// No more output.
    Done,
}

impl StreamToken {
    /// Build an error token from any displayable error.
    pub fn error(error: impl Display) -> Self {
        Self::Error(error_text(error))
    }

    /// The text to forward to the caller; `None` for the terminal sentinel.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) | Self::Error(text) => Some(text),
            Self::Done => None,
        }
    }
}
