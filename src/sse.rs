// Incremental decoder for the Anthropic SSE stream relayed by `/review`.
// Only `content_block_delta` text is of interest; every other event type
// (`message_start`, `ping`, `message_stop`, ...) is ignored, and so are
// events whose data is not valid JSON.

use serde::Deserialize;

#[derive(Deserialize)]
struct StreamEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    delta: Option<Delta>,
}

#[derive(Deserialize)]
struct Delta {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    // raw bytes so a UTF-8 sequence split across chunks stays intact
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    // Feed one network chunk, returning the text deltas of every event it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut deltas = Vec::new();
        while let Some(end) = find_event_end(&self.buffer) {
            let event: Vec<u8> = self.buffer.drain(..end + 2).collect();
            if let Some(text) = parse_event(&event[..end]) {
                deltas.push(text);
            }
        }
        deltas
    }

    // Flush a trailing event that never got its blank line.
    pub fn finish(mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        parse_event(&rest)
    }
}

fn find_event_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|w| w == b"\n\n")
}

fn parse_event(raw: &[u8]) -> Option<String> {
    let raw = String::from_utf8_lossy(raw);

    let data: String = raw
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(str::trim)
        .collect();
    if data.is_empty() {
        return None;
    }

    let event: StreamEvent = serde_json::from_str(&data).ok()?;
    if event.kind != "content_block_delta" {
        return None;
    }
    event.delta?.text.filter(|t| !t.is_empty())
}

// Reconstruct the full review text from a complete SSE body.
pub fn collect_text(body: &[u8]) -> String {
    let mut decoder = SseDecoder::new();
    let mut text: String = decoder.push(body).concat();
    if let Some(tail) = decoder.finish() {
        text.push_str(&tail);
    }
    text
}
