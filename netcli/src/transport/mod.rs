//! Transport layer.
//!
//! A transport is an open duplex byte stream to one device. The session
//! engine needs buffered reads and writes, each bounded by a deadline, plus
//! an explicit close. Dialing lives behind
//! the [`Dialer`] seam so tests and callers can supply their own streams.

pub mod config;
mod dialer;
mod ssh;
mod stream;

use std::future::Future;
use std::time::Duration;

pub use config::{Target, TransportKind};
pub use dialer::{DeviceTransport, Dialer, TransportDialer};
pub use ssh::SshTransport;
pub use stream::{StreamTransport, TelnetTransport};

use crate::error::TransportError;

/// Capability interface over an open device stream.
///
/// Reads follow the `fill_buf`/`consume` shape of a buffered reader so the
/// prompt matcher can inspect bytes without a system call per byte.
pub trait Transport: Send {
    /// Return the currently buffered bytes, reading more from the peer if the
    /// buffer is empty.
    ///
    /// A read that waits longer than `timeout` fails with
    /// [`TransportError::Timeout`]; a closed peer yields [`TransportError::Eof`].
    /// The returned slice is never empty.
    fn fill_buf(
        &mut self,
        timeout: Duration,
    ) -> impl Future<Output = Result<&[u8], TransportError>> + Send;

    /// Mark `amt` bytes of the last `fill_buf` as used.
    fn consume(&mut self, amt: usize);

    /// Write all of `data` and flush, failing if it takes longer than `timeout`.
    fn send(
        &mut self,
        data: &[u8],
        timeout: Duration,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Close the stream.
    fn close(&mut self) -> impl Future<Output = Result<(), TransportError>> + Send;
}
