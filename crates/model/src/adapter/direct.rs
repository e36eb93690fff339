//! Adapter for natively asynchronous providers.

use super::{Phase, Tracker};
use async_stream::stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{LLM, Request, SamplingParams, error_text};
use std::sync::Arc;

/// Runs calls against an async provider on the caller's runtime.
#[derive(Clone)]
pub struct Direct<P: LLM> {
    provider: P,
    sampling: Arc<SamplingParams>,
}

impl<P: LLM> Direct<P> {
    /// Wrap `provider`, applying `sampling` to every call.
    pub fn new(provider: P, sampling: SamplingParams) -> Self {
        Self {
            provider,
            sampling: Arc::new(sampling),
        }
    }

    /// The sampling parameters applied to every call.
    pub fn sampling(&self) -> &SamplingParams {
        &self.sampling
    }

    /// Run one request and yield its non-empty text deltas.
    ///
    /// A provider failure ends the stream with one in-band error token.
    pub fn stream(&self, request: Request) -> impl Stream<Item = String> + Send + use<P> {
        let provider = self.provider.clone();
        stream! {
            let mut phase = Tracker::new("direct");
            phase.advance(Phase::Requesting);

            let mut chunks = std::pin::pin!(provider.stream(request));
            while let Some(next) = chunks.next().await {
                match next {
                    Ok(chunk) => {
                        if let Some(text) = chunk.content() {
                            phase.advance(Phase::Streaming);
                            yield text.to_owned();
                        }
                    }
                    Err(e) => {
                        tracing::error!("generation failed: {e:#}");
                        phase.advance(Phase::Failed);
                        yield error_text(format!("{e:#}"));
                        return;
                    }
                }
            }
            phase.advance(Phase::Completed);
        }
    }
}
