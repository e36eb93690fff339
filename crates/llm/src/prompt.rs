//! Prompt normalization.
//!
//! Callers hand the gateway prompts in whatever shape their pipeline
//! produced: bare strings, chat messages, or loosely structured JSON. This
//! module reduces each of them to the plain text that is sent to the model.

use crate::{Error, Message, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single prompt item of unknown shape.
///
/// Deserialized prompts are always kept as [`Prompt::Value`], so a mapping
/// that merely carries a `role` is still matched against every shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Prompt {
    /// A typed chat message.
    Message(Message),
    /// Anything else: a string, or a mapping carrying the text somewhere.
    Value(Value),
}

impl Prompt {
    /// Extract the plain text of this prompt.
    ///
    /// Shapes are checked in order: typed message, `{"content": {"text": ..}}`,
    /// `{"content": ".."}`, `{"text": ".."}`, bare string. A mapping whose
    /// `content` is a block list is read as a chat message when it yields
    /// text. Anything else is stringified in [`PromptMode::Lenient`] and
    /// rejected in [`PromptMode::Strict`].
    pub fn extract(&self, mode: PromptMode) -> Result<String> {
        let value = match self {
            Self::Message(message) => return Ok(message.text().into_owned()),
            Self::Value(value) => value,
        };

        if let Some(text) = shaped_text(value) {
            return Ok(text.to_owned());
        }
        if let Some(text) = message_text(value) {
            return Ok(text);
        }

        match mode {
            PromptMode::Strict => Err(Error::UnsupportedPromptFormat(value.to_string())),
            PromptMode::Lenient => {
                tracing::warn!("unsupported prompt format, stringifying: {value}");
                Ok(value.to_string())
            }
        }
    }
}

fn shaped_text(value: &Value) -> Option<&str> {
    match value {
        Value::String(text) => Some(text),
        Value::Object(map) => {
            let content = map.get("content");
            content
                .and_then(|c| c.get("text"))
                .and_then(Value::as_str)
                .or_else(|| content.and_then(Value::as_str))
                .or_else(|| map.get("text").and_then(Value::as_str))
        }
        _ => None,
    }
}

fn message_text(value: &Value) -> Option<String> {
    value.get("content")?.as_array()?;
    let message = Message::deserialize(value).ok()?;
    Some(message.text().into_owned()).filter(|text| !text.is_empty())
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self {
        Self::Value(Value::String(text.to_owned()))
    }
}

impl From<String> for Prompt {
    fn from(text: String) -> Self {
        Self::Value(Value::String(text))
    }
}

impl From<Message> for Prompt {
    fn from(message: Message) -> Self {
        Self::Message(message)
    }
}

impl From<Value> for Prompt {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// How unrecognized prompt shapes are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptMode {
    /// Reject with [`Error::UnsupportedPromptFormat`].
    #[default]
    Strict,
    /// Fall back to the JSON rendering of the item.
    Lenient,
}

/// Normalize a list of prompts into plain text, preserving order.
pub fn normalize(prompts: &[Prompt], mode: PromptMode) -> Result<Vec<String>> {
    prompts.iter().map(|prompt| prompt.extract(mode)).collect()
}
