//! Dialing seam between sessions and concrete transports.

use std::future::Future;
use std::time::Duration;

use super::{SshTransport, Target, TelnetTransport, Transport, TransportKind};
use crate::error::TransportError;

/// Opens transports for a session.
///
/// The default [`TransportDialer`] picks the transport by [`TransportKind`];
/// tests and proxies can supply their own dialer to hand a session any
/// stream they like.
pub trait Dialer: Send + Sync {
    /// The transport this dialer produces.
    type Transport: Transport;

    /// Open a transport to `target`, giving up after `timeout`.
    fn dial(
        &self,
        target: &Target,
        timeout: Duration,
    ) -> impl Future<Output = Result<Self::Transport, TransportError>> + Send;
}

/// Transport chosen at dial time.
#[derive(Debug)]
pub enum DeviceTransport {
    Telnet(TelnetTransport),
    Ssh(SshTransport),
}

impl Transport for DeviceTransport {
    async fn fill_buf(&mut self, timeout: Duration) -> Result<&[u8], TransportError> {
        match self {
            DeviceTransport::Telnet(t) => t.fill_buf(timeout).await,
            DeviceTransport::Ssh(t) => t.fill_buf(timeout).await,
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            DeviceTransport::Telnet(t) => t.consume(amt),
            DeviceTransport::Ssh(t) => t.consume(amt),
        }
    }

    async fn send(&mut self, data: &[u8], timeout: Duration) -> Result<(), TransportError> {
        match self {
            DeviceTransport::Telnet(t) => t.send(data, timeout).await,
            DeviceTransport::Ssh(t) => t.send(data, timeout).await,
        }
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        match self {
            DeviceTransport::Telnet(t) => t.close().await,
            DeviceTransport::Ssh(t) => t.close().await,
        }
    }
}

/// Default dialer: telnet over TCP, SSH reported as unsupported.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransportDialer;

impl Dialer for TransportDialer {
    type Transport = DeviceTransport;

    async fn dial(
        &self,
        target: &Target,
        timeout: Duration,
    ) -> Result<DeviceTransport, TransportError> {
        match target.kind {
            TransportKind::Telnet => TelnetTransport::connect(&target.host, target.port, timeout)
                .await
                .map(DeviceTransport::Telnet),
            TransportKind::Ssh => SshTransport::connect(&target.host, target.port, timeout)
                .await
                .map(DeviceTransport::Ssh),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_dial_telnet() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut target = Target::new("127.0.0.1");
        target.port = listener.local_addr().unwrap().port();

        let transport = TransportDialer
            .dial(&target, Duration::from_secs(1))
            .await
            .unwrap();
        assert!(matches!(transport, DeviceTransport::Telnet(_)));
    }

    #[tokio::test]
    async fn test_dial_ssh_unsupported() {
        let mut target = Target::new("127.0.0.1");
        target.kind = TransportKind::Ssh;

        let err = TransportDialer
            .dial(&target, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Unsupported(TransportKind::Ssh)));
    }
}
