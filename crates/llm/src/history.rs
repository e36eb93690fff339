//! Conversation mapping onto provider history.
//!
//! Providers disagree on how model output is labelled in a conversation
//! (`assistant` for OpenAI-compatible APIs, `model` for Gemini), and they
//! take the system prompt out of band. The mapper splits a generic
//! conversation into a persistent instruction, the context turns, and the
//! input that is actually submitted.

use crate::{Content, Message, Request, Role, SamplingParams};
use compact_str::CompactString;
use serde::Serialize;

/// Role label for user turns; all supported providers agree on it.
pub const USER_ROLE: &str = "user";

/// A conversation turn labelled with the provider's own role name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    /// Provider role label.
    pub role: CompactString,
    /// Turn content.
    pub content: Content,
}

impl Turn {
    /// Create a new turn.
    pub fn new(role: impl Into<CompactString>, content: impl Into<Content>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a user turn.
    pub fn user(content: impl Into<Content>) -> Self {
        Self::new(USER_ROLE, content)
    }
}

/// A conversation split for a multi-turn call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mapped {
    /// The first system message of the conversation, if any.
    pub system: Option<String>,
    /// Every mapped turn except the last one.
    pub context: Vec<Turn>,
    /// The content to submit; `None` when there is nothing to send.
    pub input: Option<Content>,
}

impl Mapped {
    /// Turn the mapping into a per-call request.
    ///
    /// A non-blank `system` overrides the conversation's own system turn.
    /// Returns `None` when there is no input to submit.
    pub fn into_request(self, system: Option<&str>, sampling: &SamplingParams) -> Option<Request> {
        let input = self.input?;
        let system = system
            .filter(|s| !s.trim().is_empty())
            .map(str::to_owned)
            .or(self.system);
        Some(Request {
            system,
            context: self.context,
            input,
            sampling: sampling.clone(),
        })
    }
}

/// Maps generic conversations onto one provider's history shape.
#[derive(Debug, Clone, Copy)]
pub struct ConversationMapper {
    model_role: &'static str,
}

impl ConversationMapper {
    /// Create a mapper labelling assistant turns with `model_role`.
    pub const fn new(model_role: &'static str) -> Self {
        Self { model_role }
    }

    /// The label used for assistant turns.
    pub fn model_role(&self) -> &'static str {
        self.model_role
    }

    /// Split `history` into system instruction, context and input.
    ///
    /// Turns with empty content are skipped. The input is the most recent
    /// user content, or the last turn's content when no user turn exists.
    pub fn map(&self, history: &[Message]) -> Mapped {
        let mut system = None;
        let mut turns = Vec::with_capacity(history.len());
        let mut last_user = None;

        for message in history.iter().filter(|m| !m.content.is_empty()) {
            match message.role {
                Role::System if system.is_none() => {
                    system = Some(message.text().into_owned());
                }
                Role::System => {
                    tracing::warn!("ignoring extra system message in conversation");
                }
                Role::User => {
                    last_user = Some(message.content.clone());
                    turns.push(Turn::user(message.content.clone()));
                }
                Role::Assistant => {
                    turns.push(Turn::new(self.model_role, message.content.clone()));
                }
            }
        }

        let Some(last) = turns.pop() else {
            return Mapped {
                system,
                ..Default::default()
            };
        };

        Mapped {
            system,
            context: turns,
            input: Some(last_user.unwrap_or(last.content)),
        }
    }
}
