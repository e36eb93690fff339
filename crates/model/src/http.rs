//! HTTP transport for OpenAI-compatible streaming endpoints.
//!
//! `HttpProvider` wraps a `reqwest::Client` with pre-configured headers and
//! endpoint URL, and turns a Server-Sent Events response into a stream of
//! [`StreamChunk`]s.

use crate::sse;
use anyhow::{Result, bail};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::StreamChunk;
use reqwest::{
    Client, Method, Response,
    header::{self, HeaderMap, HeaderValue},
};
use serde::Serialize;

/// Shared HTTP transport for OpenAI-compatible providers.
///
/// Holds a `reqwest::Client`, pre-built headers (auth + content-type),
/// and the target endpoint URL.
#[derive(Clone)]
pub struct HttpProvider {
    client: Client,
    headers: HeaderMap,
    endpoint: String,
}

impl HttpProvider {
    /// Create a provider with Bearer token authentication.
    pub fn bearer(client: Client, key: &str, endpoint: &str) -> Result<Self> {
        let mut provider = Self::no_auth(client, endpoint);
        provider
            .headers
            .insert(header::AUTHORIZATION, format!("Bearer {key}").parse()?);
        Ok(provider)
    }

    /// Create a provider without authentication (e.g. a local vLLM server).
    pub fn no_auth(client: Client, endpoint: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/event-stream"));
        Self {
            client,
            headers,
            endpoint: endpoint.to_owned(),
        }
    }

    /// Stream an SSE response (OpenAI-compatible format).
    ///
    /// Parses `data:` lines, skips the `[DONE]` sentinel, and deserializes
    /// each payload as a [`StreamChunk`]. Non-success statuses fail the
    /// stream with the response body as the message.
    pub fn stream_sse<B: Serialize + ?Sized>(
        &self,
        body: &B,
    ) -> impl Stream<Item = Result<StreamChunk>> + Send + use<B> {
        if let Ok(body) = serde_json::to_string(body) {
            tracing::trace!("request: {}", body);
        }
        let request = self
            .client
            .request(Method::POST, &self.endpoint)
            .headers(self.headers.clone())
            .json(body);

        try_stream! {
            let response = ensure_success(request.send().await?).await?;

            let mut decoder = sse::Decoder::default();
            let mut stream = response.bytes_stream();
            while let Some(next) = stream.next().await {
                let bytes = next?;
                tracing::trace!("chunk: {}", String::from_utf8_lossy(&bytes));
                for payload in decoder.feed(&bytes) {
                    if let Some(chunk) = parse_chunk(&payload)? {
                        yield chunk;
                    }
                }
            }
            if let Some(payload) = decoder.finish() {
                if let Some(chunk) = parse_chunk(&payload)? {
                    yield chunk;
                }
            }
        }
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// Pass successful responses through; fail others with their body.
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    bail!("HTTP {status}: {text}")
}

/// Parse one payload. Error objects fail the stream; unparseable payloads
/// are logged and skipped.
fn parse_chunk(payload: &str) -> Result<Option<StreamChunk>> {
    let value: serde_json::Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("failed to parse chunk: {e}, data: {payload}");
            return Ok(None);
        }
    };
    if let Some(error) = value.get("error") {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .map_or_else(|| error.to_string(), str::to_owned);
        bail!("{message}");
    }
    match serde_json::from_value(value) {
        Ok(chunk) => Ok(Some(chunk)),
        Err(e) => {
            tracing::warn!("failed to parse chunk: {e}, data: {payload}");
            Ok(None)
        }
    }
}
