//! Tests for the direct adapter.

use anyhow::anyhow;
use futures_core::Stream;
use futures_util::StreamExt;
use genway_model::Direct;
use llm::{LLM, Request, SamplingParams, StreamChunk, is_error_text};
use std::sync::{Arc, Mutex};

/// Replays a fixed script and records every request it receives.
#[derive(Clone, Default)]
struct Scripted {
    script: Vec<Result<StreamChunk, &'static str>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl Scripted {
    fn new(script: Vec<Result<StreamChunk, &'static str>>) -> Self {
        Self {
            script,
            ..Default::default()
        }
    }

    fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

impl LLM for Scripted {
    const MODEL_ROLE: &'static str = "assistant";

    fn stream(&self, request: Request) -> impl Stream<Item = anyhow::Result<StreamChunk>> + Send {
        self.requests.lock().unwrap().push(request);
        let items: Vec<_> = self
            .script
            .iter()
            .map(|step| step.clone().map_err(|e| anyhow!(e)))
            .collect();
        futures_util::stream::iter(items)
    }
}

fn text(t: &str) -> Result<StreamChunk, &'static str> {
    Ok(StreamChunk::text(t))
}

fn hi() -> Request {
    Request::single(None, "hi", SamplingParams::default())
}

#[tokio::test]
async fn yields_deltas_in_order() {
    let provider = Scripted::new(vec![text("a"), text("b"), text("c")]);
    let adapter = Direct::new(provider, SamplingParams::default());

    let tokens: Vec<_> = adapter.stream(hi()).collect().await;
    assert_eq!(tokens, ["a", "b", "c"]);
}

#[tokio::test]
async fn skips_empty_chunks() {
    let provider = Scripted::new(vec![
        text("a"),
        text(""),
        Ok(StreamChunk::default()),
        text("b"),
    ]);
    let adapter = Direct::new(provider, SamplingParams::default());

    let tokens: Vec<_> = adapter.stream(hi()).collect().await;
    assert_eq!(tokens, ["a", "b"]);
}

#[tokio::test]
async fn error_becomes_final_token() {
    let provider = Scripted::new(vec![text("partial"), Err("connection reset"), text("never")]);
    let adapter = Direct::new(provider, SamplingParams::default());

    let tokens: Vec<_> = adapter.stream(hi()).collect().await;
    assert_eq!(tokens, ["partial", "\n[Error: connection reset]"]);
    assert!(is_error_text(&tokens[1]));
}

#[tokio::test]
async fn error_before_output_is_single_token() {
    let provider = Scripted::new(vec![Err("unauthorized")]);
    let adapter = Direct::new(provider, SamplingParams::default());

    let tokens: Vec<_> = adapter.stream(hi()).collect().await;
    assert_eq!(tokens, ["\n[Error: unauthorized]"]);
}

#[tokio::test]
async fn request_reaches_provider_unchanged() {
    let provider = Scripted::new(vec![text("ok")]);
    let sampling = SamplingParams {
        temperature: Some(0.4),
        ..Default::default()
    };
    let adapter = Direct::new(provider.clone(), sampling.clone());
    let request = Request::single(Some("sys".into()), "hi", sampling);

    let _: Vec<_> = adapter.stream(request.clone()).collect().await;

    assert_eq!(provider.requests(), [request]);
}

#[tokio::test]
async fn nothing_happens_until_polled() {
    let provider = Scripted::new(vec![text("a")]);
    let adapter = Direct::new(provider.clone(), SamplingParams::default());

    let stream = adapter.stream(hi());
    assert!(provider.requests().is_empty());
    drop(stream);
    assert!(provider.requests().is_empty());
}
