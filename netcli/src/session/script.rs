//! Scripted command runner.

use std::time::Duration;

use log::{debug, info};

use super::{Response, Session};
use crate::error::{Result, Stage};
use crate::prompt::PromptKind;
use crate::transport::Dialer;

impl<D: Dialer> Session<D> {
    /// Run the configured after-login commands.
    pub async fn run_after_login_commands(&mut self) -> Result<Vec<Response>> {
        let config = self.config.clone();
        info!(
            target: self.log_target(),
            "[{}] running {} after-login commands",
            self.address(),
            config.after_login_commands.len()
        );
        self.run_commands(&config.after_login_commands, None).await
    }

    /// Run the configured before-logout commands.
    ///
    /// Each read is bounded by `wait`, or the connect timeout when `None`.
    pub async fn run_before_logout_commands(
        &mut self,
        wait: Option<Duration>,
    ) -> Result<Vec<Response>> {
        let config = self.config.clone();
        info!(
            target: self.log_target(),
            "[{}] running {} before-logout commands",
            self.address(),
            config.before_logout_commands.len()
        );
        self.run_commands(&config.before_logout_commands, wait).await
    }

    /// Run `commands` in order, each awaiting the command prompt.
    ///
    /// Stops at the first failure. The status is never changed here.
    pub async fn run_commands<S: AsRef<str>>(
        &mut self,
        commands: &[S],
        wait: Option<Duration>,
    ) -> Result<Vec<Response>> {
        let pattern = self
            .prompt(PromptKind::Command)
            .map_err(|kind| self.error(Stage::Command, kind))?;

        let mut responses = Vec::with_capacity(commands.len());
        for command in commands {
            let command = command.as_ref();
            debug!(target: self.log_target(), "[{}] > {}", self.address(), command);
            let response = self
                .execute(command, &pattern, true, wait, false)
                .await
                .map_err(|kind| self.error(Stage::Command, kind))?;
            responses.push(response);
        }
        Ok(responses)
    }
}
