//! Tests for SSE line handling.

use genway_model::sse::{self, Decoder};

#[test]
fn data_extracts_payload() {
    assert_eq!(sse::data("data: {\"a\":1}"), Some("{\"a\":1}"));
    assert_eq!(sse::data("data:{\"a\":1}\r\n"), Some("{\"a\":1}"));
}

#[test]
fn data_skips_other_lines() {
    assert_eq!(sse::data(""), None);
    assert_eq!(sse::data(": keep-alive"), None);
    assert_eq!(sse::data("event: message"), None);
    assert_eq!(sse::data("data: "), None);
    assert_eq!(sse::data("data: [DONE]"), None);
}

#[test]
fn decoder_reassembles_split_lines() {
    let mut decoder = Decoder::default();
    assert!(decoder.feed(b"data: {\"x\":").is_empty());
    assert_eq!(decoder.feed(b"1}\n\ndata: {\"y\":2}\n"), ["{\"x\":1}", "{\"y\":2}"]);
    assert_eq!(decoder.finish(), None);
}

#[test]
fn decoder_reassembles_split_utf8() {
    let line = "data: héllo\n".as_bytes();
    let split = line.iter().position(|b| *b == 0xC3).unwrap() + 1;

    let mut decoder = Decoder::default();
    assert!(decoder.feed(&line[..split]).is_empty());
    assert_eq!(decoder.feed(&line[split..]), ["héllo"]);
}

#[test]
fn decoder_flushes_unterminated_line() {
    let mut decoder = Decoder::default();
    assert!(decoder.feed(b"data: tail").is_empty());
    assert_eq!(decoder.finish().as_deref(), Some("tail"));
}

#[test]
fn decoder_drops_done() {
    let mut decoder = Decoder::default();
    assert!(decoder.feed(b"data: [DONE]\n\n").is_empty());
}
