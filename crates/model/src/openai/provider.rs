//! LLM trait implementation for the OpenAI-compatible provider.

use super::{OpenAI, Request};
use anyhow::Result;
use futures_core::Stream;
use llm::{LLM, StreamChunk};

impl LLM for OpenAI {
    const MODEL_ROLE: &'static str = "assistant";

    fn stream(&self, request: llm::Request) -> impl Stream<Item = Result<StreamChunk>> + Send {
        let body = Request::new(&self.model, &request);
        self.http.stream_sse(&body)
    }
}
