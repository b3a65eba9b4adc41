//! Interactive CLI sessions with network devices.
//!
//! A [`Session`] owns one transport, one prompt set and the transcript of
//! everything exchanged with the device. It is driven by exactly one caller:
//! every operation takes `&mut self` and runs to completion before the next
//! can start. Independent sessions share nothing mutable and can run in
//! parallel tasks.

mod builder;
mod keepalive;
mod login;
#[cfg(test)]
mod mock;
mod response;
mod script;
mod status;

pub use builder::SessionBuilder;
pub use response::Response;
pub use status::SessionStatus;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, error, info, trace};
use regex::bytes::Regex;

use crate::channel::{read_until_prompt, LineBuffer};
use crate::config::SessionConfig;
use crate::error::{Error, ErrorKind, Result, Stage, TransportError};
use crate::prompt::{compile_prompt, CompiledPrompts, PromptKind, PromptSet};
use crate::transport::{Dialer, Target, Transport, TransportDialer, TransportKind};

/// Default log target for session records.
pub const DEFAULT_LOG_TARGET: &str = "netcli::session";

/// Text recorded in the transcript in place of hidden input.
const MASK: &str = "********";

/// A CLI session with one device.
pub struct Session<D: Dialer = TransportDialer> {
    /// Device identity.
    target: Target,

    /// Shared configuration (command lists, defaults).
    config: Arc<SessionConfig>,

    /// Effective connect/read/write timeout.
    conn_timeout: Duration,

    /// Effective prompt set.
    prompts: PromptSet,

    /// Prompts compiled so far.
    compiled: CompiledPrompts,

    /// Opens the transport.
    dialer: D,

    /// Open transport (None unless opened or logged in).
    transport: Option<D::Transport>,

    /// Lifecycle status.
    status: SessionStatus,

    /// Everything read and written since the session was created.
    transcript: String,

    /// Caller metadata.
    labels: HashMap<String, serde_json::Value>,

    /// Last successful read or write.
    last_interaction: Instant,

    /// Log target for this session's records.
    log_target: String,
}

impl Session<TransportDialer> {
    /// Start building a telnet session to `host`.
    pub fn builder(host: impl Into<String>) -> SessionBuilder {
        SessionBuilder::new(host)
    }
}

impl<D: Dialer> Session<D> {
    /// Create a session using the configuration's prompts and timeout.
    pub fn new(target: Target, config: Arc<SessionConfig>, dialer: D) -> Self {
        Self {
            target,
            conn_timeout: config.conn_timeout,
            prompts: config.prompts.clone(),
            config,
            compiled: CompiledPrompts::default(),
            dialer,
            transport: None,
            status: SessionStatus::Uninitialized,
            transcript: String::new(),
            labels: HashMap::new(),
            last_interaction: Instant::now(),
            log_target: DEFAULT_LOG_TARGET.to_string(),
        }
    }

    /// Get the device identity.
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Device address as `host:port`.
    pub fn address(&self) -> String {
        self.target.socket_addr()
    }

    /// Get the current status.
    ///
    /// Status is read-only for callers, unlike the read/write field the
    /// session model describes. Only the engine moves it, which keeps the
    /// "transport held exactly while opened or logged in" rule intact.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Check if a transport is open.
    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    /// Everything read from and written to the device so far.
    ///
    /// Hidden input (the login password) is recorded masked.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Time of the last successful read or write.
    ///
    /// Read-only for the same reason as [`status`](Self::status): it only
    /// moves when the transport does.
    pub fn last_interaction(&self) -> Instant {
        self.last_interaction
    }

    /// Time since the last successful read or write.
    pub fn idle_time(&self) -> Duration {
        self.last_interaction.elapsed()
    }

    /// Get the configuration this session was built from.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Get the effective prompt set.
    pub fn prompts(&self) -> &PromptSet {
        &self.prompts
    }

    /// Replace the prompt set; patterns are recompiled on next use.
    pub fn set_prompts(&mut self, prompts: PromptSet) {
        self.prompts = prompts;
        self.compiled.reset();
    }

    /// Get the effective connect/read/write timeout.
    pub fn conn_timeout(&self) -> Duration {
        self.conn_timeout
    }

    /// Get the caller metadata.
    pub fn labels(&self) -> &HashMap<String, serde_json::Value> {
        &self.labels
    }

    /// Get the caller metadata for modification.
    pub fn labels_mut(&mut self) -> &mut HashMap<String, serde_json::Value> {
        &mut self.labels
    }

    /// Get one label.
    pub fn label(&self, key: &str) -> Option<&serde_json::Value> {
        self.labels.get(key)
    }

    /// Set one label, returning the previous value.
    pub fn set_label(
        &mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Option<serde_json::Value> {
        self.labels.insert(key.into(), value.into())
    }

    /// Open the transport.
    ///
    /// Only allowed from [`SessionStatus::Uninitialized`]. On failure the
    /// status is left unchanged.
    pub async fn open(&mut self) -> Result<()> {
        if self.status != SessionStatus::Uninitialized {
            let status = self.status;
            return Err(self.error(Stage::Open, ErrorKind::InvalidStatus { status }));
        }

        if self.target.kind == TransportKind::Ssh {
            error!(
                target: self.log_target(),
                "[{}] ssh connections are not supported",
                self.address()
            );
            return Err(self.error(
                Stage::Open,
                ErrorKind::UnsupportedTransport(TransportKind::Ssh),
            ));
        }

        info!(
            target: self.log_target(),
            "[{}] opening {} connection",
            self.address(),
            self.target.kind
        );

        let transport = match self.dialer.dial(&self.target, self.conn_timeout).await {
            Ok(transport) => transport,
            Err(e) => {
                error!(
                    target: self.log_target(),
                    "[{}] open failed: {}",
                    self.address(),
                    e
                );
                let kind = match e {
                    TransportError::Unsupported(kind) => ErrorKind::UnsupportedTransport(kind),
                    other => ErrorKind::Dial(other),
                };
                return Err(self.error(Stage::Open, kind));
            }
        };

        self.transport = Some(transport);
        self.status = SessionStatus::Opened;
        info!(
            target: self.log_target(),
            "[{}] {} connection opened",
            self.address(),
            self.target.kind
        );
        Ok(())
    }

    /// Write `command`, optionally followed by `\n`.
    ///
    /// The write is bounded by `wait`, or the connect timeout when `None`.
    pub async fn write(
        &mut self,
        command: &str,
        add_newline: bool,
        wait: Option<Duration>,
    ) -> Result<()> {
        self.write_line(command, add_newline, wait, false)
            .await
            .map_err(|kind| self.error(Stage::Command, kind))
    }

    /// Read until a line matches `prompt`, returning everything read.
    ///
    /// Each read is bounded by `wait`, or the connect timeout when `None`.
    pub async fn wait(&mut self, prompt: &str, wait: Option<Duration>) -> Result<String> {
        let pattern = compile_prompt(prompt).map_err(|kind| self.error(Stage::Command, kind))?;
        self.await_prompt(&pattern, wait)
            .await
            .map_err(|kind| self.error(Stage::Command, kind))
    }

    /// Write `command` and read until a line matches `prompt`.
    ///
    /// The prompt is compiled before anything is written. Exactly one write
    /// is issued, and nothing is read until it completes.
    pub async fn command(
        &mut self,
        command: &str,
        prompt: &str,
        add_newline: bool,
        wait: Option<Duration>,
    ) -> Result<Response> {
        let pattern = compile_prompt(prompt).map_err(|kind| self.error(Stage::Command, kind))?;
        self.execute(command, &pattern, add_newline, wait, false)
            .await
            .map_err(|kind| self.error(Stage::Command, kind))
    }

    /// Send a command line and wait for the configured command prompt.
    pub async fn send_command(&mut self, command: &str) -> Result<Response> {
        let pattern = self
            .prompt(PromptKind::Command)
            .map_err(|kind| self.error(Stage::Command, kind))?;
        self.execute(command, &pattern, true, None, false)
            .await
            .map_err(|kind| self.error(Stage::Command, kind))
    }

    /// Close the session.
    ///
    /// Always ends in [`SessionStatus::Closed`]; closing twice is a no-op.
    /// An error from closing the transport is returned after the status
    /// has been updated.
    pub async fn close(&mut self) -> Result<()> {
        self.status = SessionStatus::Closed;

        let Some(mut transport) = self.transport.take() else {
            return Ok(());
        };

        debug!(target: self.log_target(), "[{}] closing connection", self.address());
        if let Err(e) = transport.close().await {
            error!(
                target: self.log_target(),
                "[{}] close failed: {}",
                self.address(),
                e
            );
            return Err(self.error(Stage::Close, ErrorKind::Close(e)));
        }
        Ok(())
    }

    /// Write, then await `pattern`.
    async fn execute(
        &mut self,
        command: &str,
        pattern: &Regex,
        add_newline: bool,
        wait: Option<Duration>,
        hidden: bool,
    ) -> std::result::Result<Response, ErrorKind> {
        let start = Instant::now();
        self.write_line(command, add_newline, wait, hidden).await?;
        let output = self.await_prompt(pattern, wait).await?;

        let shown = if hidden { MASK } else { command };
        Ok(Response::new(shown, output, start.elapsed()))
    }

    /// Write one command line and record it in the transcript.
    async fn write_line(
        &mut self,
        command: &str,
        add_newline: bool,
        wait: Option<Duration>,
        hidden: bool,
    ) -> std::result::Result<(), ErrorKind> {
        let mut line = String::with_capacity(command.len() + 1);
        line.push_str(command);
        if add_newline {
            line.push('\n');
        }

        self.send_raw(line.as_bytes(), wait).await?;

        if hidden {
            self.transcript.push_str(MASK);
            if add_newline {
                self.transcript.push('\n');
            }
        } else {
            self.transcript.push_str(&line);
        }
        Ok(())
    }

    /// Write bytes under a deadline, without touching the transcript.
    async fn send_raw(
        &mut self,
        data: &[u8],
        wait: Option<Duration>,
    ) -> std::result::Result<(), ErrorKind> {
        let timeout = wait.unwrap_or(self.conn_timeout);
        let status = self.status;
        let transport = self
            .transport
            .as_mut()
            .ok_or(ErrorKind::NotConnected { status })?;

        if let Err(e) = transport.send(data, timeout).await {
            error!(
                target: self.log_target.as_str(),
                "[{}] write failed: {}",
                self.target.socket_addr(),
                e
            );
            return Err(ErrorKind::Write(e));
        }

        self.last_interaction = Instant::now();
        trace!(
            target: self.log_target.as_str(),
            "[{}] wrote {} bytes",
            self.target.socket_addr(),
            data.len()
        );
        Ok(())
    }

    /// Read until a line matches `pattern`.
    ///
    /// Whatever was read is appended to the transcript, also on failure.
    async fn await_prompt(
        &mut self,
        pattern: &Regex,
        wait: Option<Duration>,
    ) -> std::result::Result<String, ErrorKind> {
        let timeout = wait.unwrap_or(self.conn_timeout);
        let status = self.status;
        let transport = self
            .transport
            .as_mut()
            .ok_or(ErrorKind::NotConnected { status })?;

        let mut buffer = LineBuffer::new();
        let result = read_until_prompt(
            transport,
            pattern,
            timeout,
            &mut buffer,
            &mut self.last_interaction,
        )
        .await;

        let output = buffer.as_str_lossy().into_owned();
        self.transcript.push_str(&output);

        match result {
            Ok(()) => {
                trace!(
                    target: self.log_target.as_str(),
                    "[{}] matched '{}' after {} bytes",
                    self.target.socket_addr(),
                    pattern.as_str(),
                    output.len()
                );
                Ok(output)
            }
            Err(e) => {
                error!(
                    target: self.log_target.as_str(),
                    "[{}] waiting for '{}' failed: {}",
                    self.target.socket_addr(),
                    pattern.as_str(),
                    e
                );
                Err(ErrorKind::Read(e))
            }
        }
    }

    /// Compiled pattern for one of the configured prompts.
    fn prompt(&mut self, kind: PromptKind) -> std::result::Result<Regex, ErrorKind> {
        self.compiled.get(&self.prompts, kind)
    }

    fn log_target(&self) -> &str {
        &self.log_target
    }

    fn error(&self, stage: Stage, kind: ErrorKind) -> Error {
        Error::new(self.address(), stage, kind)
    }
}

impl<D: Dialer> std::fmt::Debug for Session<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("target", &self.target)
            .field("status", &self.status)
            .field("conn_timeout", &self.conn_timeout)
            .field("prompts", &self.prompts)
            .field("transcript_len", &self.transcript.len())
            .field("labels", &self.labels)
            .finish()
    }
}
