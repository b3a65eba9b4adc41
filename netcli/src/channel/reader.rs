//! The await-prompt read loop.

use std::time::{Duration, Instant};

use log::trace;
use regex::bytes::Regex;

use super::buffer::LineBuffer;
use crate::error::TransportError;
use crate::transport::Transport;

/// Read from `transport` until a line in `buffer` matches `pattern`.
///
/// Every read is bounded by `timeout`, re-armed for each read. Bytes are
/// walked one at a time out of the transport's buffer; the first byte that
/// completes a matching line ends the loop and anything after it stays in
/// the transport for the next call. `last_read` is bumped after every
/// successful read.
///
/// On error, `buffer` keeps whatever was received before the failure.
pub async fn read_until_prompt<T: Transport>(
    transport: &mut T,
    pattern: &Regex,
    timeout: Duration,
    buffer: &mut LineBuffer,
    last_read: &mut Instant,
) -> Result<(), TransportError> {
    loop {
        let chunk = transport.fill_buf(timeout).await?;
        *last_read = Instant::now();

        let mut used = 0;
        let mut matched = false;
        for &byte in chunk {
            used += 1;
            if buffer.push(byte) && buffer.line_matches(pattern) {
                matched = true;
                break;
            }
        }
        transport.consume(used);

        trace!(
            "consumed {} bytes, buffered {} bytes, matched={}",
            used,
            buffer.len(),
            matched
        );

        if matched {
            return Ok(());
        }
    }
}
