//! Connection target description.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Wire protocol used to reach a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransportKind {
    /// Plain-text telnet over TCP.
    #[default]
    Telnet,

    /// Secure shell. Not implemented yet; open and login fail fast.
    #[serde(rename = "SSH")]
    Ssh,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Telnet => f.write_str("telnet"),
            TransportKind::Ssh => f.write_str("ssh"),
        }
    }
}

/// Identity of the device a session talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Target host (hostname or IP address).
    pub host: String,

    /// TCP port (default: 23).
    pub port: u16,

    /// Transport kind.
    #[serde(rename = "type")]
    pub kind: TransportKind,
}

impl Target {
    /// Create a telnet target on the default port.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 23,
            kind: TransportKind::Telnet,
        }
    }

    /// Get the socket address for connection.
    pub fn socket_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}
