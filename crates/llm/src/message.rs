//! Chat messages and multimodal content.
//!
//! The serialized shape follows the OpenAI-compatible chat format, so a
//! conversation read from JSON can be handed to the gateway as-is and a
//! mapped turn can be embedded directly into an OpenAI request body.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A message in the chat
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct Message {
    /// The role of the message
    pub role: Role,

    /// The content of the message
    #[serde(default)]
    pub content: Content,
}

impl Message {
    /// Create a new system message
    pub fn system(content: impl Into<Content>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a new user message
    pub fn user(content: impl Into<Content>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a new assistant message
    pub fn assistant(content: impl Into<Content>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// The plain text of this message.
    pub fn text(&self) -> Cow<'_, str> {
        self.content.text()
    }
}

/// The role of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
pub enum Role {
    /// The user role
    #[serde(rename = "user")]
    #[default]
    User,
    /// The assistant role
    #[serde(rename = "assistant")]
    Assistant,
    /// The system role
    #[serde(rename = "system")]
    System,
}

/// Message content: either plain text or an ordered list of blocks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Content {
    /// Plain text.
    Text(String),
    /// Text and image blocks in display order.
    Blocks(Vec<ContentBlock>),
}

impl Content {
    /// Concatenated text of this content. Image blocks contribute nothing.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Blocks(blocks) => {
                let texts: Vec<&str> = blocks.iter().filter_map(ContentBlock::as_text).collect();
                match texts.as_slice() {
                    [] => Cow::Borrowed(""),
                    [only] => Cow::Borrowed(*only),
                    many => Cow::Owned(many.concat()),
                }
            }
        }
    }

    /// Whether there is nothing to send.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Blocks(blocks) => blocks.is_empty(),
        }
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<Vec<ContentBlock>> for Content {
    fn from(blocks: Vec<ContentBlock>) -> Self {
        Self::Blocks(blocks)
    }
}

/// One unit of multimodal content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A text segment.
    Text {
        /// The text.
        text: String,
    },
    /// An image, referenced by remote URL or inline data URI.
    ImageUrl {
        /// The image location.
        image_url: ImageUrl,
    },
}

impl ContentBlock {
    /// Create a text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create an image block.
    pub fn image(url: impl Into<String>) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }

    /// The text of a text block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::ImageUrl { .. } => None,
        }
    }

    /// The URL of an image block.
    pub fn as_image_url(&self) -> Option<&str> {
        match self {
            Self::Text { .. } => None,
            Self::ImageUrl { image_url } => Some(&image_url.url),
        }
    }
}

/// Image location inside an [`ContentBlock::ImageUrl`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImageUrl {
    /// Remote URL or `data:` URI.
    pub url: String,
}

/// Parse a JSON conversation (`[{"role": .., "content": ..}, ..]`).
///
/// Unknown roles or malformed entries fail with
/// [`Error::UnsupportedPromptFormat`].
pub fn parse_history(json: &str) -> Result<Vec<Message>> {
    serde_json::from_str(json).map_err(|e| Error::UnsupportedPromptFormat(e.to_string()))
}
