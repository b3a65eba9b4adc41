//! Session lifecycle status.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a session is in its lifecycle.
///
/// ```text
/// uninitialized -> opened -> logined
///                    |
///                    +-----> error_logon
/// (any) -> closed
/// ```
///
/// A transport is held exactly while the status is `Opened` or `LoggedIn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Created, never opened.
    #[default]
    #[serde(rename = "uninitialized")]
    Uninitialized,

    /// Transport established, not logged in.
    #[serde(rename = "opened")]
    Opened,

    /// Login sequence completed.
    #[serde(rename = "logined")]
    LoggedIn,

    /// A login step failed; the transport has been dropped.
    #[serde(rename = "error_logon")]
    LoginFailed,

    /// Closed by the caller.
    #[serde(rename = "closed")]
    Closed,
}

impl SessionStatus {
    /// Whether a session in this status holds a transport.
    pub fn has_transport(self) -> bool {
        matches!(self, SessionStatus::Opened | SessionStatus::LoggedIn)
    }

    /// Whether the session has been closed.
    pub fn is_closed(self) -> bool {
        self == SessionStatus::Closed
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionStatus::Uninitialized => "uninitialized",
            SessionStatus::Opened => "opened",
            SessionStatus::LoggedIn => "logined",
            SessionStatus::LoginFailed => "error_logon",
            SessionStatus::Closed => "closed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_serde() {
        for status in [
            SessionStatus::Uninitialized,
            SessionStatus::Opened,
            SessionStatus::LoggedIn,
            SessionStatus::LoginFailed,
            SessionStatus::Closed,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
        }
    }

    #[test]
    fn test_has_transport() {
        assert!(SessionStatus::Opened.has_transport());
        assert!(SessionStatus::LoggedIn.has_transport());
        assert!(!SessionStatus::LoginFailed.has_transport());
        assert!(!SessionStatus::Closed.has_transport());
        assert!(!SessionStatus::default().has_transport());
    }
}
