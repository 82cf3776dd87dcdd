// Check Result Domain Model

use super::command::CommandLine;

/// Outcome of one executed check
///
/// Built once by a [`CheckTask`](crate::port::CheckTask) and never mutated
/// after it is handed to the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    name: String,
    memo: String,
    command: CommandLine,
    stdout: String,
    stderr: String,
    /// `None` when no exit status was observed (launch failure, signal, panic)
    exit_code: Option<i32>,
    error_message: String,
}

impl CheckResult {
    /// Result of a process that ran and exited with `exit_code`
    pub fn exited(
        name: impl Into<String>,
        memo: impl Into<String>,
        command: CommandLine,
        exit_code: i32,
    ) -> Self {
        Self {
            name: name.into(),
            memo: memo.into(),
            command,
            stdout: String::new(),
            stderr: String::new(),
            exit_code: Some(exit_code),
            error_message: String::new(),
        }
    }

    /// Result of a check that produced no exit status
    ///
    /// An empty `error` is replaced with a generic message so the result is
    /// never mistaken for a success.
    pub fn aborted(
        name: impl Into<String>,
        memo: impl Into<String>,
        command: CommandLine,
        error: impl Into<String>,
    ) -> Self {
        let mut error_message = error.into();
        if error_message.is_empty() {
            error_message = "unable to execute".to_string();
        }

        Self {
            name: name.into(),
            memo: memo.into(),
            command,
            stdout: String::new(),
            stderr: String::new(),
            exit_code: None,
            error_message,
        }
    }

    /// Attach captured output, trimming surrounding whitespace
    pub fn with_output(mut self, stdout: &str, stderr: &str) -> Self {
        self.stdout = stdout.trim().to_string();
        self.stderr = stderr.trim().to_string();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }

    pub fn command(&self) -> &CommandLine {
        &self.command
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// True when the command could not run to an exit status
    pub fn is_unable_to_execute(&self) -> bool {
        self.exit_code.is_none()
    }

    /// Failing iff the exit code is not zero or an error was recorded
    pub fn is_failing(&self) -> bool {
        self.exit_code != Some(0) || !self.error_message.is_empty()
    }
}
