//! Login sequence.

use log::{error, info};

use super::{Session, SessionStatus};
use crate::error::{ErrorKind, LoginStep, Result, Stage};
use crate::prompt::PromptKind;
use crate::transport::{Dialer, TransportKind};

impl<D: Dialer> Session<D> {
    /// Log in with a name and password.
    ///
    /// Waits for the login prompt, sends `username` and waits for the
    /// password prompt, then sends `password` and waits for the command
    /// prompt. The password is recorded masked in the transcript.
    ///
    /// If any step fails the session moves to
    /// [`SessionStatus::LoginFailed`] and its transport is dropped.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        if self.target.kind == TransportKind::Ssh {
            return Err(self.error(
                Stage::Login,
                ErrorKind::UnsupportedTransport(TransportKind::Ssh),
            ));
        }

        if self.transport.is_none() {
            let status = self.status;
            return Err(self.error(Stage::Login, ErrorKind::NotConnected { status }));
        }
        if self.status != SessionStatus::Opened {
            let status = self.status;
            return Err(self.error(Stage::Login, ErrorKind::InvalidStatus { status }));
        }

        match self.login_sequence(username, password).await {
            Ok(()) => {
                self.status = SessionStatus::LoggedIn;
                info!(
                    target: self.log_target(),
                    "[{}] logged in as {}",
                    self.address(),
                    username
                );
                Ok(())
            }
            Err((step, kind)) => {
                error!(
                    target: self.log_target(),
                    "[{}] login failed at '{}': {}",
                    self.address(),
                    step,
                    kind
                );
                self.status = SessionStatus::LoginFailed;
                self.transport = None;
                Err(self.error(
                    Stage::Login,
                    ErrorKind::LoginFailed {
                        step,
                        source: Box::new(kind),
                    },
                ))
            }
        }
    }

    async fn login_sequence(
        &mut self,
        username: &str,
        password: &str,
    ) -> std::result::Result<(), (LoginStep, ErrorKind)> {
        let step = LoginStep::AwaitLogin;
        let login = self.prompt(PromptKind::Login).map_err(|e| (step, e))?;
        self.await_prompt(&login, None)
            .await
            .map_err(|e| (step, e))?;

        let step = LoginStep::SendUsername;
        let password_prompt = self.prompt(PromptKind::Password).map_err(|e| (step, e))?;
        self.execute(username, &password_prompt, true, None, false)
            .await
            .map_err(|e| (step, e))?;

        let step = LoginStep::SendPassword;
        let command = self.prompt(PromptKind::Command).map_err(|e| (step, e))?;
        self.execute(password, &command, true, None, true)
            .await
            .map_err(|e| (step, e))?;

        Ok(())
    }
}
