//! Scripted transport for session tests.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::TransportError;
use crate::transport::{Dialer, Target, Transport};

/// One scripted interaction.
#[derive(Debug)]
pub(crate) enum Step {
    /// The device sends these bytes.
    Read(&'static [u8]),
    /// The session must write exactly these bytes next.
    Write(&'static [u8]),
    /// The device closes the stream.
    Eof,
    /// The device goes quiet until the deadline passes.
    Stall,
}

/// Counters shared between a test and its transport.
#[derive(Debug, Clone, Default)]
pub(crate) struct Counters {
    pub writes: Arc<AtomicUsize>,
    pub reads: Arc<AtomicUsize>,
    pub closed: Arc<AtomicBool>,
    pub dials: Arc<AtomicUsize>,
}

impl Counters {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn dials(&self) -> usize {
        self.dials.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Transport that replays a script and panics on unexpected writes or on
/// reads issued while a write is still expected.
#[derive(Debug)]
pub(crate) struct ScriptedTransport {
    steps: VecDeque<Step>,
    pending: &'static [u8],
    counters: Counters,
    fail_close: bool,
}

impl Transport for ScriptedTransport {
    async fn fill_buf(&mut self, timeout: Duration) -> Result<&[u8], TransportError> {
        if self.pending.is_empty() {
            match self.steps.pop_front() {
                Some(Step::Read(data)) => {
                    self.counters.reads.fetch_add(1, Ordering::SeqCst);
                    self.pending = data;
                }
                Some(Step::Write(expected)) => panic!(
                    "read issued while write {:?} was expected",
                    String::from_utf8_lossy(expected)
                ),
                Some(Step::Stall) => {
                    tokio::time::sleep(timeout).await;
                    return Err(TransportError::Timeout(timeout));
                }
                Some(Step::Eof) | None => return Err(TransportError::Eof),
            }
        }
        Ok(self.pending)
    }

    fn consume(&mut self, amt: usize) {
        self.pending = &self.pending[amt..];
    }

    async fn send(&mut self, data: &[u8], _timeout: Duration) -> Result<(), TransportError> {
        match self.steps.pop_front() {
            Some(Step::Write(expected)) => {
                assert_eq!(
                    String::from_utf8_lossy(data),
                    String::from_utf8_lossy(expected),
                    "unexpected write"
                );
                self.counters.writes.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            Some(Step::Eof) | None => Err(TransportError::Io(io::ErrorKind::BrokenPipe.into())),
            Some(other) => panic!(
                "write {:?} issued while {:?} was scripted",
                String::from_utf8_lossy(data),
                other
            ),
        }
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.counters.closed.store(true, Ordering::SeqCst);
        if self.fail_close {
            return Err(TransportError::Io(io::ErrorKind::NotConnected.into()));
        }
        Ok(())
    }
}

/// Dialer handing out one scripted transport.
#[derive(Debug)]
pub(crate) struct ScriptedDialer {
    transport: Mutex<Option<ScriptedTransport>>,
    counters: Counters,
    stall: bool,
}

impl ScriptedDialer {
    pub fn new(steps: Vec<Step>) -> (Self, Counters) {
        Self::build(steps, false, false)
    }

    pub fn failing_close(steps: Vec<Step>) -> (Self, Counters) {
        Self::build(steps, true, false)
    }

    /// Dialer whose connect never completes within the timeout.
    pub fn unreachable() -> (Self, Counters) {
        Self::build(vec![], false, true)
    }

    fn build(steps: Vec<Step>, fail_close: bool, stall: bool) -> (Self, Counters) {
        let counters = Counters::default();
        let transport = ScriptedTransport {
            steps: steps.into(),
            pending: &[],
            counters: counters.clone(),
            fail_close,
        };
        let dialer = Self {
            transport: Mutex::new(Some(transport)),
            counters: counters.clone(),
            stall,
        };
        (dialer, counters)
    }
}

impl Dialer for ScriptedDialer {
    type Transport = ScriptedTransport;

    async fn dial(
        &self,
        target: &Target,
        timeout: Duration,
    ) -> Result<ScriptedTransport, TransportError> {
        self.counters.dials.fetch_add(1, Ordering::SeqCst);
        if self.stall {
            return match tokio::time::timeout(timeout, std::future::pending::<Infallible>()).await
            {
                Ok(never) => match never {},
                Err(_) => Err(TransportError::ConnectTimeout(timeout)),
            };
        }
        self.transport
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| TransportError::ConnectFailed {
                addr: target.socket_addr(),
                source: io::ErrorKind::ConnectionRefused.into(),
            })
    }
}
