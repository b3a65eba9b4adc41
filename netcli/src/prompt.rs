//! Prompt patterns for the login sequence and command execution.

use regex::bytes::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// The three prompts a session needs to recognize.
///
/// Patterns are plain strings until first use; see [`CompiledPrompts`].
/// The default command prompt is a single token ending in `#`, `>` or `$`
/// alone on its line, so prompt characters inside command output do not end
/// the read early.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptSet {
    /// Prompt asking for the login name.
    pub login: String,

    /// Prompt asking for the password.
    pub password: String,

    /// Operator command prompt.
    pub command: String,
}

impl PromptSet {
    /// Create a prompt set from three patterns.
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
            command: command.into(),
        }
    }

    /// Get the pattern for a prompt kind.
    pub fn pattern(&self, kind: PromptKind) -> &str {
        match kind {
            PromptKind::Login => &self.login,
            PromptKind::Password => &self.password,
            PromptKind::Command => &self.command,
        }
    }
}

impl Default for PromptSet {
    fn default() -> Self {
        Self {
            login: r"(?i)(?:login|username):\s*$".to_string(),
            password: r"(?i)password:\s*$".to_string(),
            command: r"^[^\s#>$]+[#>$]\s*$".to_string(),
        }
    }
}

/// Selects one of the prompts in a [`PromptSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Login,
    Password,
    Command,
}

/// Compile a prompt pattern.
pub fn compile_prompt(pattern: &str) -> Result<Regex, ErrorKind> {
    Regex::new(pattern).map_err(|source| ErrorKind::PromptCompile {
        pattern: pattern.to_string(),
        source,
    })
}

/// Per-session cache of compiled prompts.
///
/// Each pattern is compiled the first time it is waited for. A pattern that
/// fails to compile is not cached, so the error repeats on every use.
#[derive(Debug, Default)]
pub(crate) struct CompiledPrompts {
    login: Option<Regex>,
    password: Option<Regex>,
    command: Option<Regex>,
}

impl CompiledPrompts {
    /// Get the compiled regex for `kind`, compiling it on first use.
    pub(crate) fn get(&mut self, prompts: &PromptSet, kind: PromptKind) -> Result<Regex, ErrorKind> {
        let slot = match kind {
            PromptKind::Login => &mut self.login,
            PromptKind::Password => &mut self.password,
            PromptKind::Command => &mut self.command,
        };

        if let Some(regex) = slot {
            return Ok(regex.clone());
        }

        let regex = compile_prompt(prompts.pattern(kind))?;
        *slot = Some(regex.clone());
        Ok(regex)
    }

    /// Drop every cached regex, e.g. after the prompt set changed.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = PromptSet::default();
        let login = compile_prompt(&prompts.login).unwrap();
        let password = compile_prompt(&prompts.password).unwrap();
        let command = compile_prompt(&prompts.command).unwrap();

        assert!(login.is_match(b"Login: "));
        assert!(login.is_match(b"Username:"));
        assert!(password.is_match(b"Password: "));
        assert!(command.is_match(b"DES-3200#"));
        assert!(command.is_match(b"<HUAWEI>"));
        assert!(command.is_match(b"router(config-if)# "));
        assert!(command.is_match(b"admin@host:~$"));
        assert!(!command.is_match(b"Password: "));

        // Prompt characters inside a line of output are not a prompt
        assert!(!command.is_match(b"Gi0/1 uplink->"));
        assert!(!command.is_match(b"Gi0/2 port#"));
        assert!(!command.is_match(b"total $"));
    }

    #[test]
    fn test_compile_error_is_reported() {
        let err = compile_prompt(r"(unclosed").unwrap_err();
        match err {
            ErrorKind::PromptCompile { pattern, .. } => assert_eq!(pattern, "(unclosed"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_cache_compiles_once() {
        let prompts = PromptSet::new(r"login:", r"password:", r"sw#");
        let mut cache = CompiledPrompts::default();

        let first = cache.get(&prompts, PromptKind::Command).unwrap();
        assert!(first.is_match(b"sw#"));
        assert!(cache.command.is_some());
        assert!(cache.login.is_none());

        cache.reset();
        assert!(cache.command.is_none());
    }

    #[test]
    fn test_cache_does_not_keep_failures() {
        let prompts = PromptSet::new(r"[", r"password:", r"#");
        let mut cache = CompiledPrompts::default();

        assert!(cache.get(&prompts, PromptKind::Login).is_err());
        assert!(cache.get(&prompts, PromptKind::Login).is_err());
        assert!(cache.get(&prompts, PromptKind::Command).is_ok());
    }
}
