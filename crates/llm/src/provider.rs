//! Provider abstractions for the unified generation interface

use crate::{Content, SamplingParams, StreamChunk, Turn};
use anyhow::Result;
use futures_core::Stream;

/// A single generation call, fully described.
///
/// Built per call and handed to a provider by value, so a system prompt or
/// sampling override never touches state shared with other calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Persistent system instruction.
    pub system: Option<String>,
    /// Prior turns, already labelled for the target provider.
    pub context: Vec<Turn>,
    /// The new user input.
    pub input: Content,
    /// Sampling parameters for this call.
    pub sampling: SamplingParams,
}

impl Request {
    /// A single-turn request.
    pub fn single(
        system: Option<String>,
        input: impl Into<Content>,
        sampling: SamplingParams,
    ) -> Self {
        Self {
            system,
            context: Vec::new(),
            input: input.into(),
            sampling,
        }
    }

    /// Context turns followed by the input as a user turn.
    pub fn turns(&self) -> impl Iterator<Item = Turn> + '_ {
        self.context
            .iter()
            .cloned()
            .chain(std::iter::once(Turn::user(self.input.clone())))
    }
}

/// A provider whose streaming API is natively asynchronous.
pub trait LLM: Clone + Send + Sync + 'static {
    /// Role label this provider expects for model output in history.
    const MODEL_ROLE: &'static str;

    /// Send a request and stream the response chunks.
    fn stream(&self, request: Request) -> impl Stream<Item = Result<StreamChunk>> + Send;
}

/// A provider whose streaming call blocks the calling thread.
///
/// Both the call and the returned iterator must run off the async runtime;
/// the gateway drives them on a dedicated worker thread.
pub trait BlockingLLM: Clone + Send + Sync + 'static {
    /// Role label this provider expects for model output in history.
    const MODEL_ROLE: &'static str;

    /// Iterator over the response chunks.
    type Chunks: Iterator<Item = Result<StreamChunk>>;

    /// Send a request and return an iterator over the response chunks.
    fn stream(&self, request: &Request) -> Result<Self::Chunks>;
}
