//! Tests for stream chunks, handoff tokens and in-band errors.

use genway_llm::{Error, StreamChunk, StreamToken, error_text, is_error_text};

#[test]
fn error_marker_format() {
    assert_eq!(error_text("timed out"), "\n[Error: timed out]");
    assert!(is_error_text("\n[Error: timed out]"));
    assert!(!is_error_text("[Error: no leading newline]"));
    assert!(!is_error_text("ordinary text"));
}

#[test]
fn token_text() {
    assert_eq!(StreamToken::Text("a".into()).into_text().as_deref(), Some("a"));
    assert_eq!(
        StreamToken::error("boom").into_text().as_deref(),
        Some("\n[Error: boom]")
    );
    assert_eq!(StreamToken::Done.into_text(), None);
}

#[test]
fn chunk_content_skips_empty() {
    let chunk: StreamChunk = serde_json::from_str(
        r#"{"id":"c1","model":"m","choices":[{"index":0,"delta":{"content":""}}]}"#,
    )
    .unwrap();
    assert_eq!(chunk.content(), None);
    assert_eq!(chunk.model, "m");

    let chunk: StreamChunk = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
    assert_eq!(chunk.content(), None);
}

#[test]
fn chunk_content_and_reason() {
    let chunk: StreamChunk = serde_json::from_str(
        r#"{"choices":[{"delta":{"role":"assistant","content":"hi"},"finish_reason":"stop"}]}"#,
    )
    .unwrap();
    assert_eq!(chunk.content(), Some("hi"));
    assert_eq!(chunk.reason(), Some("stop"));
    assert_eq!(StreamChunk::text("x").content(), Some("x"));
}

#[test]
fn provider_failure_keeps_context_chain() {
    let err: Error = anyhow::anyhow!("connection refused")
        .context("request failed")
        .into();
    assert!(matches!(err, Error::ProviderCallFailure(_)));
    assert_eq!(
        err.to_string(),
        "provider call failed: request failed: connection refused"
    );
}

#[test]
fn backend_not_initialized_display() {
    let err = Error::BackendNotInitialized {
        backend: "gemini",
        reason: "api key required".into(),
    };
    assert_eq!(
        err.to_string(),
        "backend 'gemini' not initialized: api key required"
    );
}
