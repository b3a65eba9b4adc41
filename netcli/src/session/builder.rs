//! Builder for creating sessions.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::{Session, DEFAULT_LOG_TARGET};
use crate::config::SessionConfig;
use crate::error::{Error, ErrorKind, Result, Stage};
use crate::prompt::PromptSet;
use crate::transport::{Dialer, Target, TransportDialer, TransportKind};

/// Builder for constructing sessions.
///
/// # Example
///
/// ```rust,no_run
/// use netcli::Session;
///
/// # async fn example() -> Result<(), netcli::Error> {
/// let mut session = Session::builder("192.0.2.1")
///     .port(2323)
///     .label("site", "lab")
///     .build()?;
///
/// session.open().await?;
/// session.login("admin", "secret").await?;
/// # Ok(())
/// # }
/// ```
pub struct SessionBuilder<D: Dialer = TransportDialer> {
    target: Target,
    config: Arc<SessionConfig>,
    conn_timeout: Option<Duration>,
    prompts: Option<PromptSet>,
    profile: Option<String>,
    labels: HashMap<String, serde_json::Value>,
    log_target: String,
    dialer: D,
}

impl SessionBuilder<TransportDialer> {
    /// Create a new builder for the specified host (telnet, port 23).
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            target: Target::new(host),
            config: Arc::new(SessionConfig::default()),
            conn_timeout: None,
            prompts: None,
            profile: None,
            labels: HashMap::new(),
            log_target: DEFAULT_LOG_TARGET.to_string(),
            dialer: TransportDialer,
        }
    }
}

impl<D: Dialer> SessionBuilder<D> {
    /// Set the port (default: 23).
    pub fn port(mut self, port: u16) -> Self {
        self.target.port = port;
        self
    }

    /// Set the transport kind (default: telnet).
    pub fn kind(mut self, kind: TransportKind) -> Self {
        self.target.kind = kind;
        self
    }

    /// Use a configuration owned by this session.
    pub fn config(self, config: SessionConfig) -> Self {
        self.shared_config(Arc::new(config))
    }

    /// Use a configuration shared with other sessions.
    pub fn shared_config(mut self, config: Arc<SessionConfig>) -> Self {
        self.config = config;
        self
    }

    /// Override the configured connect timeout.
    pub fn conn_timeout(mut self, timeout: Duration) -> Self {
        self.conn_timeout = Some(timeout);
        self
    }

    /// Override the configured prompts.
    pub fn prompts(mut self, prompts: PromptSet) -> Self {
        self.prompts = Some(prompts);
        self
    }

    /// Use a named prompt profile from the configuration.
    ///
    /// Explicit [`prompts`](Self::prompts) take precedence.
    pub fn prompt_profile(mut self, name: impl Into<String>) -> Self {
        self.profile = Some(name.into());
        self
    }

    /// Attach a label.
    pub fn label(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Set the log target for this session's records.
    pub fn log_target(mut self, target: impl Into<String>) -> Self {
        self.log_target = target.into();
        self
    }

    /// Use a different dialer.
    pub fn dialer<D2: Dialer>(self, dialer: D2) -> SessionBuilder<D2> {
        SessionBuilder {
            target: self.target,
            config: self.config,
            conn_timeout: self.conn_timeout,
            prompts: self.prompts,
            profile: self.profile,
            labels: self.labels,
            log_target: self.log_target,
            dialer,
        }
    }

    /// Build the session.
    ///
    /// This creates the session but does not connect. Call `open()` on the
    /// returned session to establish the connection.
    pub fn build(self) -> Result<Session<D>> {
        let prompts = match (self.prompts, self.profile) {
            (Some(prompts), _) => prompts,
            (None, Some(name)) => match self.config.profile(&name) {
                Some(prompts) => prompts.clone(),
                None => {
                    return Err(Error::new(
                        self.target.socket_addr(),
                        Stage::Open,
                        ErrorKind::UnknownProfile { name },
                    ));
                }
            },
            (None, None) => self.config.prompts.clone(),
        };

        let mut session = Session::new(self.target, self.config, self.dialer);
        if let Some(timeout) = self.conn_timeout {
            session.conn_timeout = timeout;
        }
        session.prompts = prompts;
        session.labels = self.labels;
        session.log_target = self.log_target;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CONN_TIMEOUT;
    use crate::session::SessionStatus;

    fn config() -> SessionConfig {
        SessionConfig::new()
            .with_conn_timeout(Duration::from_secs(5))
            .with_profile("dlink", PromptSet::new("UserName:", "PassWord:", r"#\s*$"))
    }

    #[test]
    fn test_defaults() {
        let session = SessionBuilder::new("192.0.2.1").build().unwrap();
        assert_eq!(session.address(), "192.0.2.1:23");
        assert_eq!(session.target().kind, TransportKind::Telnet);
        assert_eq!(session.conn_timeout(), DEFAULT_CONN_TIMEOUT);
        assert_eq!(session.prompts(), &PromptSet::default());
        assert_eq!(session.status(), SessionStatus::Uninitialized);
        assert_eq!(session.log_target(), DEFAULT_LOG_TARGET);
    }

    #[test]
    fn test_overrides() {
        let session = SessionBuilder::new("2001:db8::1")
            .port(2323)
            .config(config())
            .conn_timeout(Duration::from_millis(750))
            .label("site", "lab")
            .log_target("netcli::lab")
            .build()
            .unwrap();

        assert_eq!(session.address(), "[2001:db8::1]:2323");
        assert_eq!(session.conn_timeout(), Duration::from_millis(750));
        assert_eq!(session.config().conn_timeout, Duration::from_secs(5));
        assert_eq!(session.label("site"), Some(&serde_json::json!("lab")));
        assert_eq!(session.log_target(), "netcli::lab");
    }

    #[test]
    fn test_prompt_profile() {
        let shared = Arc::new(config());
        let session = SessionBuilder::new("192.0.2.1")
            .shared_config(shared.clone())
            .prompt_profile("dlink")
            .build()
            .unwrap();
        assert_eq!(session.prompts().login, "UserName:");
        assert_eq!(Arc::strong_count(&shared), 2);

        let explicit = PromptSet::new("login:", "password:", ">");
        let session = SessionBuilder::new("192.0.2.1")
            .shared_config(shared)
            .prompt_profile("dlink")
            .prompts(explicit.clone())
            .build()
            .unwrap();
        assert_eq!(session.prompts(), &explicit);
    }

    #[test]
    fn test_unknown_profile() {
        let err = SessionBuilder::new("192.0.2.1")
            .config(config())
            .prompt_profile("huawei")
            .build()
            .unwrap_err();

        assert_eq!(err.stage, Stage::Open);
        assert!(matches!(err.kind, ErrorKind::UnknownProfile { ref name } if name == "huawei"));
    }
}
