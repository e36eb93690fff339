//! Blocking LLM trait implementation for the Gemini provider.

use super::{Gemini, Request, Response};
use crate::sse;
use anyhow::{Result, bail};
use llm::{BlockingLLM, StreamChunk};
use reqwest::blocking::{Client, Response as HttpResponse};
use std::{
    io::{BufRead, BufReader, Lines},
    time::Duration,
};

/// Header carrying the Gemini API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

impl BlockingLLM for Gemini {
    const MODEL_ROLE: &'static str = "model";

    type Chunks = Chunks;

    fn stream(&self, request: &llm::Request) -> Result<Chunks> {
        let inner = &self.inner;
        let body = Request::new(request, inner.config.generation_config(&request.sampling));
        tracing::trace!("request: {}", serde_json::to_string(&body)?);

        // Built per call on the calling thread: a blocking client must never
        // be created or dropped inside the async runtime.
        let client = Client::builder().timeout(None::<Duration>).build()?;
        let response = client
            .post(&inner.endpoint)
            .header(API_KEY_HEADER, inner.config.api_key.as_str())
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            bail!("HTTP {status}: {text}");
        }

        Ok(Chunks {
            lines: BufReader::new(response).lines(),
        })
    }
}

/// Blocking iterator over the chunks of one Gemini response.
pub struct Chunks {
    lines: Lines<BufReader<HttpResponse>>,
}

impl Iterator for Chunks {
    type Item = Result<StreamChunk>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            let Some(payload) = sse::data(&line) else {
                continue;
            };
            tracing::trace!("chunk: {payload}");

            let response: Response = match serde_json::from_str(payload) {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!("failed to parse gemini chunk: {e}, data: {payload}");
                    continue;
                }
            };
            if let Some(error) = response.error {
                return Some(Err(anyhow::anyhow!(
                    "gemini error {}: {}",
                    error.code,
                    error.message
                )));
            }
            return Some(Ok(response.into_chunk()));
        }
    }
}
