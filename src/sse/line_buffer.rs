//! Byte-to-line buffering
//!
//! Transports that hand over raw body chunks feed them through a
//! [`LineBuffer`] so the decoder only ever sees whole lines. Chunks may split
//! a line, or a multi-byte UTF-8 character, anywhere. A completed line that
//! is not valid UTF-8 is dropped.

/// Accumulates raw bytes and yields complete lines.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buffer: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and drain every line it completes.
    ///
    /// Returned lines have their `\n` / `\r\n` terminator removed. Lines that
    /// are not valid UTF-8 are logged and skipped.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let rest = self.buffer.split_off(pos + 1);
            let mut line = std::mem::replace(&mut self.buffer, rest);
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.extend(decode_line_bytes(line));
        }
        lines
    }

    /// Flush a trailing line that had no terminator.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let mut line = std::mem::take(&mut self.buffer);
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        decode_line_bytes(line)
    }

    /// Number of buffered bytes not yet part of a complete line.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

fn decode_line_bytes(line: Vec<u8>) -> Option<String> {
    match String::from_utf8(line) {
        Ok(line) => Some(line),
        Err(e) => {
            tracing::warn!(
                bytes = e.as_bytes().len(),
                "Dropping line with invalid UTF-8: {}",
                e.utf8_error()
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_chunk_multiple_lines() {
        let mut buf = LineBuffer::new();
        let lines = buf.push(b"data: a\ndata: b\n");
        assert_eq!(lines, vec!["data: a", "data: b"]);
        assert_eq!(buf.pending(), 0);
    }

    #[test]
    fn test_line_split_across_chunks() {
        let mut buf = LineBuffer::new();
        assert!(buf.push(b"data: {\"choi").is_empty());
        assert!(buf.pending() > 0);
        let lines = buf.push(b"ces\":[]}\r\n");
        assert_eq!(lines, vec!["data: {\"choices\":[]}"]);
    }

    #[test]
    fn test_utf8_split_across_chunks() {
        let text = "data: héllo\n".as_bytes();
        // Split inside the two-byte 'é'
        let split = text.iter().position(|b| *b == 0xC3).unwrap() + 1;
        let mut buf = LineBuffer::new();
        assert!(buf.push(&text[..split]).is_empty());
        assert_eq!(buf.push(&text[split..]), vec!["data: héllo"]);
    }

    #[test]
    fn test_finish_flushes_partial_line() {
        let mut buf = LineBuffer::new();
        buf.push(b"data: [DONE]");
        assert_eq!(buf.finish(), Some("data: [DONE]".to_string()));
        assert_eq!(buf.finish(), None);
    }

    #[test]
    fn test_empty_lines_preserved() {
        let mut buf = LineBuffer::new();
        assert_eq!(buf.push(b"\n\ndata: x\n"), vec!["", "", "data: x"]);
    }

    #[test]
    fn test_invalid_utf8_line_is_dropped() {
        let mut buf = LineBuffer::new();
        let mut chunk = b"data: {\"choices\":[{\"delta\":{\"content\":\"a".to_vec();
        chunk.push(0xFF);
        chunk.extend_from_slice(b"b\"}}]}\ndata: [DONE]\n");

        assert_eq!(buf.push(&chunk), vec!["data: [DONE]"]);
        assert_eq!(buf.pending(), 0);
    }

    #[test]
    fn test_invalid_utf8_trailing_line_is_dropped() {
        let mut buf = LineBuffer::new();
        assert!(buf.push(&[b'd', b'a', 0xC3, 0x28]).is_empty());
        assert_eq!(buf.finish(), None);
        assert_eq!(buf.pending(), 0);
    }
}
