//! Error types for netcli.

use std::fmt;
use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::session::SessionStatus;
use crate::transport::TransportKind;

/// Main error type for session operations.
///
/// Every error carries the device address and the operation stage it was
/// raised in, so a caller juggling many sessions can tell them apart.
#[derive(Error, Debug)]
#[error("{stage} failed on {address}: {kind}")]
pub struct Error {
    /// Device address as `host:port`.
    pub address: String,

    /// Operation that failed.
    pub stage: Stage,

    /// What went wrong.
    #[source]
    pub kind: ErrorKind,
}

impl Error {
    pub(crate) fn new(address: impl Into<String>, stage: Stage, kind: ErrorKind) -> Self {
        Self {
            address: address.into(),
            stage,
            kind,
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Whether this is a secure-shell "not implemented" failure.
    pub fn is_unsupported_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::UnsupportedTransport(_))
    }
}

/// Logical stage of the session an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Open,
    Login,
    Command,
    Ping,
    Close,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Open => "open",
            Stage::Login => "login",
            Stage::Command => "command",
            Stage::Ping => "ping",
            Stage::Close => "close",
        };
        f.write_str(name)
    }
}

/// Step of the login sequence that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStep {
    /// Waiting for the login prompt.
    AwaitLogin,
    /// Sending the login name and waiting for the password prompt.
    SendUsername,
    /// Sending the password and waiting for the command prompt.
    SendPassword,
}

impl fmt::Display for LoginStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoginStep::AwaitLogin => "await login prompt",
            LoginStep::SendUsername => "send username",
            LoginStep::SendPassword => "send password",
        };
        f.write_str(name)
    }
}

/// Session-level failure kinds.
#[derive(Error, Debug)]
pub enum ErrorKind {
    /// The transport could not be established.
    #[error("dial error: {0}")]
    Dial(TransportError),

    /// The requested transport kind is not implemented.
    #[error("unsupported transport: {0}")]
    UnsupportedTransport(TransportKind),

    /// A prompt pattern failed to compile.
    #[error("invalid prompt pattern '{pattern}': {source}")]
    PromptCompile {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Reading from the transport failed (end-of-stream, deadline or I/O).
    #[error("read error: {0}")]
    Read(TransportError),

    /// Writing to the transport failed.
    #[error("write error: {0}")]
    Write(TransportError),

    /// Closing the transport failed.
    #[error("close error: {0}")]
    Close(TransportError),

    /// A login step failed.
    #[error("login failed at '{step}': {source}")]
    LoginFailed {
        step: LoginStep,
        #[source]
        source: Box<ErrorKind>,
    },

    /// The operation needs an open transport.
    #[error("session not connected (status: {status})")]
    NotConnected { status: SessionStatus },

    /// The session is not in a status that allows the operation.
    #[error("operation not allowed in status {status}")]
    InvalidStatus { status: SessionStatus },

    /// A named prompt profile is not present in the configuration.
    #[error("prompt profile '{name}' not found in configuration")]
    UnknownProfile { name: String },
}

impl ErrorKind {
    /// The transport error underneath this kind, if any.
    pub fn transport_error(&self) -> Option<&TransportError> {
        match self {
            ErrorKind::Dial(e)
            | ErrorKind::Read(e)
            | ErrorKind::Write(e)
            | ErrorKind::Close(e) => Some(e),
            ErrorKind::LoginFailed { source, .. } => source.transport_error(),
            _ => None,
        }
    }
}

/// Transport layer errors (dial, deadlines, stream I/O).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to connect to host
    #[error("connection to {addr} failed: {source}")]
    ConnectFailed {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Dial did not complete in time
    #[error("connect timed out after {0:?}")]
    ConnectTimeout(Duration),

    /// Read or write deadline exceeded
    #[error("deadline exceeded after {0:?}")]
    Timeout(Duration),

    /// Peer closed the stream
    #[error("end of stream")]
    Eof,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport kind has no implementation yet
    #[error("{0} transport is not supported")]
    Unsupported(TransportKind),
}

/// Result type alias using netcli's Error.
pub type Result<T> = std::result::Result<T, Error>;
