//! Incremental decoder for server-sent event streams
//!
//! The gateway encodes each update as a `data: <json>` frame terminated by a
//! blank line, with optional `event:` names and `:`-prefixed keep-alive
//! comments. The decoder accepts arbitrary byte chunks (frames may be split
//! anywhere) and yields complete messages as they close.

/// One dispatched SSE message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseMessage {
    pub event: Option<String>,
    pub data: String,
}

/// Streaming SSE frame decoder
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: String,
    event: Option<String>,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk, returning every message the chunk completes
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseMessage> {
        self.buffer.push_str(&String::from_utf8_lossy(chunk));

        let mut messages = Vec::new();
        while let Some(pos) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=pos).collect();
            let line = line.trim_end_matches(['\n', '\r']);

            if line.is_empty() {
                if let Some(message) = self.dispatch() {
                    messages.push(message);
                }
            } else {
                self.field(line);
            }
        }

        messages
    }

    fn field(&mut self, line: &str) {
        // a line starting with ':' is a comment (the gateway's keep-alive)
        if line.starts_with(':') {
            return;
        }

        let (name, value) = match line.split_once(':') {
            Some((name, value)) => (name, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match name {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            // id/retry fields are not used by this client
            _ => {}
        }
    }

    fn dispatch(&mut self) -> Option<SseMessage> {
        if self.data.is_empty() {
            // per the SSE processing model, no data means no message
            self.event = None;
            return None;
        }

        let message = SseMessage {
            event: self.event.take(),
            data: self.data.join("\n"),
        };
        self.data.clear();
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_single_frame() {
        let mut decoder = SseDecoder::new();
        let messages = decoder.feed(b"data: {\"id\":1}\n\n");
        assert_eq!(
            messages,
            vec![SseMessage {
                event: None,
                data: "{\"id\":1}".to_string()
            }]
        );
    }

    #[test]
    fn frame_split_across_chunks_is_reassembled() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"data: {\"id\"").is_empty());
        assert!(decoder.feed(b":1}\n").is_empty());
        let messages = decoder.feed(b"\n");
        assert_eq!(messages[0].data, "{\"id\":1}");
    }

    #[test]
    fn keep_alive_comments_produce_nothing() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b": heartbeat\n\n").is_empty());
        assert!(decoder.feed(b":\n\n").is_empty());
    }

    #[test]
    fn named_event_and_crlf_lines() {
        let mut decoder = SseDecoder::new();
        let messages = decoder.feed(b"event: update\r\ndata: 1\r\n\r\n");
        assert_eq!(
            messages,
            vec![SseMessage {
                event: Some("update".to_string()),
                data: "1".to_string()
            }]
        );
    }

    #[test]
    fn multiple_frames_in_one_chunk() {
        let mut decoder = SseDecoder::new();
        let messages = decoder.feed(b"data: a\n\ndata: b\n\n");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].data, "a");
        assert_eq!(messages[1].data, "b");
    }

    #[test]
    fn multi_line_data_joins_with_newline() {
        let mut decoder = SseDecoder::new();
        let messages = decoder.feed(b"data: first\ndata: second\n\n");
        assert_eq!(messages[0].data, "first\nsecond");
    }
}
