//! Decoding of OpenAI-style `text/event-stream` completion bodies.

use serde::Deserialize;

use crate::llm::ProviderError;

#[derive(Deserialize)]
struct StreamChunk {
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Deserialize, Default)]
struct Delta {
    content: Option<String>,
}

/// One decoded SSE line.
#[derive(Debug, PartialEq, Eq)]
pub enum SseEvent {
    /// Non-empty text delta.
    Text(String),
    /// `data: [DONE]`.
    Done,
}

/// Longest line accepted before the body is treated as malformed.
pub const MAX_LINE_BYTES: usize = 1 << 20;

/// Accumulates raw body bytes and yields only complete lines, so neither a
/// line nor a multi-byte character is ever split across network chunks.
#[derive(Debug)]
pub struct LineBuffer {
    pending: Vec<u8>,
    // Bytes of `pending` already known to contain no newline.
    scanned: usize,
    max_line: usize,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::with_max_line(MAX_LINE_BYTES)
    }
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_line(max_line: usize) -> Self {
        Self { pending: Vec::new(), scanned: 0, max_line }
    }

    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<String>, ProviderError> {
        self.pending.extend_from_slice(chunk);
        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.pending[start + self.scanned..].iter().position(|b| *b == b'\n') {
            let end = start + self.scanned + offset;
            lines.push(decode_line(&self.pending[start..end]));
            start = end + 1;
            self.scanned = 0;
        }
        self.pending.drain(..start);
        self.scanned = self.pending.len();

        if self.pending.len() > self.max_line {
            let len = self.pending.len();
            self.pending.clear();
            self.scanned = 0;
            return Err(
                ProviderError::Parse(format!("SSE line exceeds {} bytes ({} buffered)", self.max_line, len))
            );
        }
        Ok(lines)
    }

    /// Whatever is left once the body has ended without a final newline.
    pub fn finish(&mut self) -> Option<String> {
        self.scanned = 0;
        if self.pending.is_empty() {
            return None;
        }
        let raw = std::mem::take(&mut self.pending);
        Some(decode_line(&raw))
    }
}

fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

/// Interprets one SSE line. `Ok(None)` for lines that carry no text.
pub fn parse_line(line: &str) -> Result<Option<SseEvent>, ProviderError> {
    let Some(data) = line.strip_prefix("data:") else {
        // Blank separators, `:` comments, `event:`/`id:`/`retry:` fields.
        return Ok(None);
    };
    let data = data.trim_start();
    if data.is_empty() {
        return Ok(None);
    }
    if data == "[DONE]" {
        return Ok(Some(SseEvent::Done));
    }

    let chunk: StreamChunk = serde_json
        ::from_str(data)
        .map_err(|e| ProviderError::Parse(format!("{}: {}", e, data)))?;

    let text = chunk.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .filter(|content| !content.is_empty());

    Ok(text.map(SseEvent::Text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_split_across_chunks() {
        let mut buffer = LineBuffer::new();
        assert!(buffer.push(b"data: {\"choices\":[{\"del").unwrap().is_empty());
        let lines = buffer.push(b"ta\":{\"content\":\"Hi\"}}]}\n\ndata: [DONE]\n").unwrap();
        assert_eq!(lines, ["data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}", "", "data: [DONE]"]);
        assert_eq!(buffer.finish(), None);
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        let bytes = "data: é\n".as_bytes();
        let mut buffer = LineBuffer::new();
        // Split inside the two-byte 'é'.
        assert!(buffer.push(&bytes[..7]).unwrap().is_empty());
        assert_eq!(buffer.push(&bytes[7..]).unwrap(), ["data: é"]);
    }

    #[test]
    fn test_crlf_and_trailing_line() {
        let mut buffer = LineBuffer::new();
        assert_eq!(buffer.push(b"data: a\r\ndata: b").unwrap(), ["data: a"]);
        assert_eq!(buffer.finish().as_deref(), Some("data: b"));
        assert_eq!(buffer.finish(), None);
    }

    #[test]
    fn test_long_line_in_small_chunks() {
        let mut buffer = LineBuffer::new();
        let line = format!("data: {}", "x".repeat(10_000));
        for piece in line.as_bytes().chunks(7) {
            assert!(buffer.push(piece).unwrap().is_empty());
        }
        let lines = buffer.push(b"\ndata: next").unwrap();
        assert_eq!(lines, [line]);
        assert_eq!(buffer.finish().as_deref(), Some("data: next"));
    }

    #[test]
    fn test_newline_arriving_after_scanned_bytes() {
        let mut buffer = LineBuffer::new();
        assert!(buffer.push(b"data: a").unwrap().is_empty());
        assert!(buffer.push(b"bc").unwrap().is_empty());
        assert_eq!(buffer.push(b"\n\ndata: d\n").unwrap(), ["data: abc", "", "data: d"]);
        assert_eq!(buffer.finish(), None);
    }

    #[test]
    fn test_unterminated_line_overflows() {
        let mut buffer = LineBuffer::with_max_line(16);
        assert!(buffer.push(b"data: 0123456789").unwrap().is_empty());
        let err = buffer.push(b"abc").unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
        assert_eq!(buffer.finish(), None);

        // A complete line longer than the cap is still fine once it is drained.
        let mut buffer = LineBuffer::with_max_line(4);
        assert_eq!(buffer.push(b"data: long\n").unwrap(), ["data: long"]);
    }

    #[test]
    fn test_parse_text_delta() {
        let line = r#"data: {"id":"x","choices":[{"index":0,"delta":{"content":" world"},"finish_reason":null}]}"#;
        assert_eq!(parse_line(line).unwrap(), Some(SseEvent::Text(" world".into())));
    }

    #[test]
    fn test_parse_skips_empty_and_metadata() {
        let role_only = r#"data: {"choices":[{"delta":{"role":"assistant","content":""}}]}"#;
        assert_eq!(parse_line(role_only).unwrap(), None);
        let finish = r#"data: {"choices":[{"delta":{},"finish_reason":"stop"}],"x_groq":{"usage":{}}}"#;
        assert_eq!(parse_line(finish).unwrap(), None);
        assert_eq!(parse_line(r#"data: {"choices":[]}"#).unwrap(), None);
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line(": keep-alive").unwrap(), None);
        assert_eq!(parse_line("event: message").unwrap(), None);
    }

    #[test]
    fn test_parse_done() {
        assert_eq!(parse_line("data: [DONE]").unwrap(), Some(SseEvent::Done));
        assert_eq!(parse_line("data:[DONE]").unwrap(), Some(SseEvent::Done));
    }

    #[test]
    fn test_parse_malformed_payload() {
        let err = parse_line("data: {not json").unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));

        let err = parse_line(r#"data: {"error":{"message":"rate limited"}}"#).unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }
}
