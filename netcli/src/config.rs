//! Session configuration.
//!
//! Configuration is plain data: callers deserialize it with whatever format
//! they use and share it between sessions behind an `Arc`. Nothing here is
//! process-global.

use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::prompt::PromptSet;

/// Default connect/read/write timeout.
pub const DEFAULT_CONN_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-session (or shared) configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Dial timeout, and the default deadline for every read and write.
    #[serde(with = "duration_secs")]
    pub conn_timeout: Duration,

    /// Prompts used for login and commands.
    pub prompts: PromptSet,

    /// Commands to run after a successful login.
    pub after_login_commands: Vec<String>,

    /// Commands to run before closing the session.
    pub before_logout_commands: Vec<String>,

    /// Named prompt sets, selectable per session.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub profiles: IndexMap<String, PromptSet>,
}

impl SessionConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the connect timeout.
    pub fn with_conn_timeout(mut self, timeout: Duration) -> Self {
        self.conn_timeout = timeout;
        self
    }

    /// Set the prompt set.
    pub fn with_prompts(mut self, prompts: PromptSet) -> Self {
        self.prompts = prompts;
        self
    }

    /// Add an after-login command.
    pub fn with_after_login_command(mut self, command: impl Into<String>) -> Self {
        self.after_login_commands.push(command.into());
        self
    }

    /// Add a before-logout command.
    pub fn with_before_logout_command(mut self, command: impl Into<String>) -> Self {
        self.before_logout_commands.push(command.into());
        self
    }

    /// Add a named prompt profile.
    pub fn with_profile(mut self, name: impl Into<String>, prompts: PromptSet) -> Self {
        self.profiles.insert(name.into(), prompts);
        self
    }

    /// Get a named prompt profile.
    pub fn profile(&self, name: &str) -> Option<&PromptSet> {
        self.profiles.get(name)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            conn_timeout: DEFAULT_CONN_TIMEOUT,
            prompts: PromptSet::default(),
            after_login_commands: vec![],
            before_logout_commands: vec![],
            profiles: IndexMap::new(),
        }
    }
}

/// Durations as (fractional) seconds.
mod duration_secs {
    use std::time::Duration;

    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}
