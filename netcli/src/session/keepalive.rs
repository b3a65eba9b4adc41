//! Telnet keep-alive.

use std::time::Instant;

use log::{debug, warn};

use super::Session;
use crate::channel::ARE_YOU_THERE;
use crate::error::{ErrorKind, Result, Stage};
use crate::transport::{Dialer, Transport};

impl<D: Dialer> Session<D> {
    /// Send an "are you there" byte and wait for one byte back.
    ///
    /// Both the write and the read are bounded by the connect timeout. Only
    /// the last-interaction time changes; the transcript and status are left
    /// alone. The echoed byte is consumed and discarded.
    pub async fn ping(&mut self) -> Result<()> {
        let timeout = self.conn_timeout;
        let status = self.status;
        let Some(transport) = self.transport.as_mut() else {
            return Err(self.error(Stage::Ping, ErrorKind::NotConnected { status }));
        };

        if let Err(e) = transport.send(&[ARE_YOU_THERE], timeout).await {
            warn!(
                target: self.log_target.as_str(),
                "[{}] keep-alive write failed: {}",
                self.target.socket_addr(),
                e
            );
            return Err(self.error(Stage::Ping, ErrorKind::Write(e)));
        }
        self.last_interaction = Instant::now();

        if let Err(e) = transport.fill_buf(timeout).await.map(|_| ()) {
            warn!(
                target: self.log_target.as_str(),
                "[{}] keep-alive read failed: {}",
                self.target.socket_addr(),
                e
            );
            return Err(self.error(Stage::Ping, ErrorKind::Read(e)));
        }
        transport.consume(1);
        self.last_interaction = Instant::now();

        debug!(
            target: self.log_target.as_str(),
            "[{}] keep-alive answered",
            self.target.socket_addr()
        );
        Ok(())
    }
}
