/// Simple SSE event parser that accumulates lines until a blank line, then yields the combined `data:` payload.
/// Multiple `data:` lines per event are joined by `\n`.
///
/// Bytes are buffered raw and only complete lines are decoded, so a multi-byte
/// character split across network chunks survives intact.
pub struct SseEventParser {
    buf: Vec<u8>,
    // Accumulates data: lines for the current event until blank line.
    cur_data_lines: Vec<String>,
}

impl Default for SseEventParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SseEventParser {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(16 * 1024),
            cur_data_lines: Vec::with_capacity(4),
        }
    }

    /// Feed bytes and extract zero or more complete SSE event payloads (already joined).
    pub fn push_and_drain_events(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);
        let mut out = Vec::new();

        let mut start = 0;
        while let Some(offset) = self.buf[start..].iter().position(|&b| b == b'\n') {
            let end = start + offset;
            let mut raw = &self.buf[start..end];
            start = end + 1;
            if let Some(stripped) = raw.strip_suffix(b"\r") {
                raw = stripped;
            }

            // Blank line => event terminator
            if raw.is_empty() {
                if !self.cur_data_lines.is_empty() {
                    out.push(self.cur_data_lines.join("\n"));
                    self.cur_data_lines.clear();
                }
                continue;
            }

            // Only `data:` lines matter; `event:`/`id:`/comments are ignored
            let line = String::from_utf8_lossy(raw);
            if let Some(rest) = line.strip_prefix("data:") {
                self.cur_data_lines.push(rest.trim_start().to_string());
            }
        }
        self.buf.drain(..start);

        out
    }

    /// Flush at end-of-stream (if the server doesn't send a final blank line).
    pub fn flush(mut self) -> Option<String> {
        if !self.buf.is_empty() {
            self.buf.push(b'\n');
            let _ = self.push_and_drain_events(&[]);
        }
        if self.cur_data_lines.is_empty() {
            None
        } else {
            Some(self.cur_data_lines.join("\n"))
        }
    }
}
