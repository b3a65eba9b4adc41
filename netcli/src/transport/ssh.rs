//! Secure-shell transport placeholder.
//!
//! The type exists so the dialer can treat both transport kinds the same
//! way. It cannot be constructed: [`SshTransport::connect`] always returns
//! [`TransportError::Unsupported`] without touching the network.

use std::convert::Infallible;
use std::time::Duration;

use log::warn;

use super::{Transport, TransportKind};
use crate::error::TransportError;

/// SSH transport (not implemented).
#[derive(Debug)]
pub struct SshTransport {
    never: Infallible,
}

impl SshTransport {
    /// Always fails with [`TransportError::Unsupported`].
    pub async fn connect(host: &str, port: u16, _timeout: Duration) -> Result<Self, TransportError> {
        warn!("ssh transport requested for {}:{} but is not supported", host, port);
        Err(TransportError::Unsupported(TransportKind::Ssh))
    }
}

impl Transport for SshTransport {
    async fn fill_buf(&mut self, _timeout: Duration) -> Result<&[u8], TransportError> {
        let never = self.never;
        match never {}
    }

    fn consume(&mut self, _amt: usize) {
        let never = self.never;
        match never {}
    }

    async fn send(&mut self, _data: &[u8], _timeout: Duration) -> Result<(), TransportError> {
        let never = self.never;
        match never {}
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        let never = self.never;
        match never {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_is_unsupported() {
        let err = SshTransport::connect("192.0.2.1", 22, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Unsupported(TransportKind::Ssh)));
    }
}
