//! # netcli
//!
//! Async telnet CLI session engine for network device automation.
//!
//! A [`Session`] dials a device, walks the login/password/command prompt
//! sequence and then runs commands, returning everything the device printed
//! up to the next prompt. Each session owns its transport exclusively, so
//! many sessions can run side by side in separate tasks.
//!
//! ## Features
//!
//! - Line-oriented prompt matching with a telnet control-byte filter
//! - Per-read deadlines on every operation
//! - Keep-alive ping that leaves the transcript untouched
//! - Scripted after-login and before-logout command lists
//! - Serde configuration with named prompt profiles
//!
//! Secure shell is recognized as a transport kind but not implemented;
//! opening or logging in over it fails with an unsupported-transport error.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use netcli::Session;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), netcli::Error> {
//!     let mut session = Session::builder("192.0.2.1").build()?;
//!
//!     session.open().await?;
//!     session.login("admin", "secret").await?;
//!
//!     let response = session.send_command("show version").await?;
//!     println!("{}", response.body());
//!
//!     session.close().await?;
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod config;
pub mod error;
pub mod prompt;
pub mod session;
pub mod transport;

// Re-export main types for convenience
pub use config::SessionConfig;
pub use error::{Error, ErrorKind, Result};
pub use prompt::PromptSet;
pub use session::{Response, Session, SessionBuilder, SessionStatus};
pub use transport::{Dialer, Target, Transport, TransportKind};
