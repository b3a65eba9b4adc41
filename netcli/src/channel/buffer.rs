//! Line-aware buffer for prompt detection.
//!
//! Prompts are matched against one accumulated line at a time, never the
//! raw stream, so `^` and `$` in a prompt pattern anchor to a single line.
//! Because only the current line changes as bytes arrive, only the current
//! line is re-tested after each byte.

use bytes::BytesMut;
use regex::bytes::Regex;

use super::filter::is_control_byte;

/// Initial buffer capacity.
const INITIAL_CAPACITY: usize = 4096;

/// Buffer for accumulating filtered output and matching prompts per line.
#[derive(Debug, Default)]
pub struct LineBuffer {
    /// The accumulated output buffer, control bytes removed.
    buffer: BytesMut,

    /// Offset of the first byte of the current (last) line.
    line_start: usize,
}

impl LineBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(INITIAL_CAPACITY),
            line_start: 0,
        }
    }

    /// Append one byte from the stream.
    ///
    /// Control bytes are discarded. Returns `true` if the byte was kept.
    pub fn push(&mut self, byte: u8) -> bool {
        if is_control_byte(byte) {
            return false;
        }
        self.buffer.extend_from_slice(&[byte]);
        if byte == b'\n' {
            self.line_start = self.buffer.len();
        }
        true
    }

    /// The line currently being accumulated (everything after the last `\n`).
    pub fn current_line(&self) -> &[u8] {
        &self.buffer[self.line_start..]
    }

    /// Check the current line against a prompt pattern.
    pub fn line_matches(&self, pattern: &Regex) -> bool {
        pattern.is_match(self.current_line())
    }

    /// Get the buffer contents as a string (lossy UTF-8 conversion).
    pub fn as_str_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.buffer)
    }

    /// Get the current buffer length.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
