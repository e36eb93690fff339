//! Backend adapters.
//!
//! An adapter runs one generation call and yields a lazy, finite, one-shot
//! stream of text deltas. [`Direct`] drives natively async providers on the
//! caller's runtime; [`Bridged`] drives blocking providers on a worker thread.
//! [`Adapter`] is the closed set the gateway picks from at construction.

use crate::{BackendKind, Gemini, OpenAI};
use async_stream::stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{BlockingLLM, Content, ConversationMapper, LLM, Message, Request, SamplingParams};
pub use bridge::{Bridge, Bridged, DEFAULT_WAIT, Sender};
pub use direct::Direct;
pub use phase::{Phase, Tracker};

mod bridge;
mod direct;
mod phase;

/// The adapter selected for a gateway.
#[derive(Clone)]
pub enum Adapter {
    /// OpenAI-compatible provider, streamed natively.
    Direct(Direct<OpenAI>),
    /// Gemini provider, bridged from a worker thread.
    Bridged(Bridged<Gemini>),
}

impl Adapter {
    /// Stream delivery kind.
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Direct(_) => BackendKind::DirectStream,
            Self::Bridged(_) => BackendKind::BridgedStream,
        }
    }

    /// Role label the provider expects for model turns.
    pub fn model_role(&self) -> &'static str {
        match self {
            Self::Direct(_) => <OpenAI as LLM>::MODEL_ROLE,
            Self::Bridged(_) => <Gemini as BlockingLLM>::MODEL_ROLE,
        }
    }

    /// The sampling parameters applied to every call.
    pub fn sampling(&self) -> &SamplingParams {
        match self {
            Self::Direct(a) => a.sampling(),
            Self::Bridged(a) => a.sampling(),
        }
    }

    /// Single-turn generation.
    pub fn generate(
        &self,
        system: Option<&str>,
        input: Content,
    ) -> impl Stream<Item = String> + Send + use<> {
        self.start(Some(single(system, input, self.sampling())))
    }

    /// Multi-turn generation over a provider-neutral history.
    pub fn multiturn(
        &self,
        history: &[Message],
        system: Option<&str>,
    ) -> impl Stream<Item = String> + Send + use<> {
        self.start(map_history(
            self.model_role(),
            history,
            system,
            self.sampling(),
        ))
    }

    fn start(&self, request: Option<Request>) -> impl Stream<Item = String> + Send + use<> {
        let this = self.clone();
        stream! {
            let Some(request) = request else {
                return;
            };
            match this {
                Adapter::Direct(adapter) => {
                    let mut tokens = std::pin::pin!(adapter.stream(request));
                    while let Some(token) = tokens.next().await {
                        yield token;
                    }
                }
                Adapter::Bridged(adapter) => {
                    let mut tokens = std::pin::pin!(adapter.stream(request));
                    while let Some(token) = tokens.next().await {
                        yield token;
                    }
                }
            }
        }
    }
}

fn single(system: Option<&str>, input: Content, sampling: &SamplingParams) -> Request {
    Request::single(system.map(str::to_owned), input, sampling.clone())
}

fn map_history(
    model_role: &'static str,
    history: &[Message],
    system: Option<&str>,
    sampling: &SamplingParams,
) -> Option<Request> {
    let request = ConversationMapper::new(model_role)
        .map(history)
        .into_request(system, sampling);
    if request.is_none() {
        tracing::debug!("conversation has no input, nothing to generate");
    }
    request
}
