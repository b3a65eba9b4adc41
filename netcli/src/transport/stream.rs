//! Buffered stream transport, used for telnet.

use std::time::Duration;

use log::debug;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use super::Transport;
use crate::error::TransportError;

/// Default read buffer capacity.
const READ_BUFFER_SIZE: usize = 4096;

/// Transport over any async byte stream.
///
/// Reads go through a [`BufReader`], so the matcher walks bytes in memory and
/// only hits the socket when the buffer runs dry.
#[derive(Debug)]
pub struct StreamTransport<S> {
    stream: BufReader<S>,
}

/// Plain-text telnet transport over TCP.
pub type TelnetTransport = StreamTransport<TcpStream>;

impl<S> StreamTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Wrap an already connected stream.
    pub fn new(stream: S) -> Self {
        Self::with_capacity(READ_BUFFER_SIZE, stream)
    }

    /// Wrap a stream with a specific read buffer capacity.
    pub fn with_capacity(capacity: usize, stream: S) -> Self {
        Self {
            stream: BufReader::with_capacity(capacity, stream),
        }
    }

    /// Get a reference to the underlying stream.
    pub fn get_ref(&self) -> &S {
        self.stream.get_ref()
    }

    /// Consume the transport, returning the underlying stream.
    ///
    /// Bytes already buffered but not consumed are lost.
    pub fn into_inner(self) -> S {
        self.stream.into_inner()
    }
}

impl StreamTransport<TcpStream> {
    /// Dial `host:port` over TCP, giving up after `timeout`.
    pub async fn connect(host: &str, port: u16, timeout: Duration) -> Result<Self, TransportError> {
        let addr = format!("{}:{}", host, port);
        debug!("dialing {} (timeout {:?})", addr, timeout);

        let stream = tokio::time::timeout(timeout, TcpStream::connect((host, port)))
            .await
            .map_err(|_| TransportError::ConnectTimeout(timeout))?
            .map_err(|source| TransportError::ConnectFailed {
                addr: addr.clone(),
                source,
            })?;

        // Prompts arrive in small writes.
        stream.set_nodelay(true)?;

        Ok(Self::new(stream))
    }
}

impl<S> Transport for StreamTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn fill_buf(&mut self, timeout: Duration) -> Result<&[u8], TransportError> {
        let buf = tokio::time::timeout(timeout, self.stream.fill_buf())
            .await
            .map_err(|_| TransportError::Timeout(timeout))??;

        if buf.is_empty() {
            return Err(TransportError::Eof);
        }
        Ok(buf)
    }

    fn consume(&mut self, amt: usize) {
        self.stream.consume(amt);
    }

    async fn send(&mut self, data: &[u8], timeout: Duration) -> Result<(), TransportError> {
        let stream = &mut self.stream;
        tokio::time::timeout(timeout, async move {
            stream.write_all(data).await?;
            stream.flush().await
        })
        .await
        .map_err(|_| TransportError::Timeout(timeout))??;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.stream.shutdown().await?;
        Ok(())
    }
}
