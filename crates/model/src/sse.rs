//! Server-Sent Events line handling shared by both transports.

/// Extract the payload of a `data:` line.
///
/// Returns `None` for other fields, blank payloads and the `[DONE]`
/// terminator.
pub fn data(line: &str) -> Option<&str> {
    let payload = line
        .trim_end_matches(['\r', '\n'])
        .strip_prefix("data:")?
        .trim();
    if payload.is_empty() || payload == "[DONE]" {
        None
    } else {
        Some(payload)
    }
}

/// Incremental decoder for an SSE body arriving in arbitrary byte chunks.
///
/// Lines split across network reads, including multi-byte characters, are
/// reassembled before parsing.
#[derive(Debug, Default)]
pub struct Decoder {
    buf: Vec<u8>,
}

impl Decoder {
    /// Feed raw bytes and collect every complete `data:` payload.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(bytes);
        let mut payloads = Vec::new();
        while let Some(pos) = self.buf.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            if let Some(payload) = data(&String::from_utf8_lossy(&line)) {
                payloads.push(payload.to_owned());
            }
        }
        payloads
    }

    /// Flush a trailing line that was not newline-terminated.
    pub fn finish(self) -> Option<String> {
        data(&String::from_utf8_lossy(&self.buf)).map(str::to_owned)
    }
}
