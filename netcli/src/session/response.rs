//! Response type for command execution results.

use std::time::Duration;

/// Response from a command execution.
#[derive(Debug, Clone)]
pub struct Response {
    /// The command that was sent (masked for hidden input).
    pub command: String,

    /// Everything received between the write and the prompt, prompt included.
    pub output: String,

    /// The line that matched the prompt pattern.
    pub prompt: String,

    /// Time taken to execute the command.
    pub elapsed: Duration,
}

impl Response {
    /// Create a new response; the prompt is the last line of `output`.
    pub fn new(command: impl Into<String>, output: impl Into<String>, elapsed: Duration) -> Self {
        let output = output.into();
        let start = memchr::memrchr(b'\n', output.as_bytes()).map_or(0, |pos| pos + 1);
        let prompt = output[start..].trim().to_string();
        Self {
            command: command.into(),
            output,
            prompt,
            elapsed,
        }
    }

    /// Output without the echoed command line and the trailing prompt line.
    pub fn body(&self) -> &str {
        let output = self
            .output
            .strip_prefix(self.command.as_str())
            .unwrap_or(&self.output)
            .trim_start_matches(['\r', '\n']);

        match output.rfind('\n') {
            Some(pos) => output[..pos].trim_end_matches('\r'),
            None => "",
        }
    }

    /// Get the output lines as an iterator.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.output.lines()
    }

    /// Check if the output contains a substring.
    pub fn contains(&self, pattern: &str) -> bool {
        self.output.contains(pattern)
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_last_line() {
        let response = Response::new(
            "show vlan",
            "show vlan\r\nVID 1 default\r\nsw1# ",
            Duration::from_millis(5),
        );
        assert_eq!(response.prompt, "sw1#");
        assert_eq!(response.body(), "VID 1 default");
        assert!(response.contains("default"));
    }

    #[test]
    fn test_body_without_echo_or_output() {
        let response = Response::new("", "sw1#", Duration::ZERO);
        assert_eq!(response.prompt, "sw1#");
        assert_eq!(response.body(), "");
    }
}
