// Command check task - runs one external command per check
use async_trait::async_trait;
use std::process::{Output, Stdio};
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, info, warn};

use checkrun_core::domain::{CheckResult, CheckSpec, CommandLine};
use checkrun_core::port::CheckTask;

/// Check backed by an external process
///
/// Spawns exactly one child per `check()` call and waits for it without a
/// timeout. A command that never exits keeps the whole run waiting.
pub struct CommandCheckTask {
    spec: CheckSpec,
}

impl CommandCheckTask {
    /// Create a new command check task
    ///
    /// # Example
    /// ```ignore
    /// let task = CommandCheckTask::new(
    ///     CheckSpec::new("ssh", CommandLine::args(["check-procs", "--pattern", "sshd"])),
    /// );
    /// ```
    pub fn new(spec: CheckSpec) -> Self {
        Self { spec }
    }

    /// Program name used in launch error messages
    fn program(&self) -> &str {
        match &self.spec.command {
            CommandLine::Shell(_) => SHELL,
            CommandLine::Args(args) => args.first().map(String::as_str).unwrap_or_default(),
        }
    }

    /// Translate the command line into a process builder
    fn build_command(&self) -> Option<Command> {
        if self.spec.command.is_empty() {
            return None;
        }

        let mut command = match &self.spec.command {
            CommandLine::Shell(line) => {
                let mut command = Command::new(SHELL);
                command.args(SHELL_ARGS).arg(line);
                command
            }
            CommandLine::Args(args) => {
                let mut command = Command::new(&args[0]);
                command.args(&args[1..]);
                command
            }
        };

        command
            .envs(&self.spec.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        Some(command)
    }

    /// Spawn child process and wait for output
    async fn spawn_and_wait(&self, mut command: Command) -> Result<Output, String> {
        let child = command
            .spawn()
            .map_err(|e| format!("failed to execute {}: {}", self.program(), e))?;

        child
            .wait_with_output()
            .await
            .map_err(|e| format!("failed to wait for {}: {}", self.program(), e))
    }

    /// Build check result from process output
    fn build_result(&self, output: Output) -> CheckResult {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        let result = match output.status.code() {
            Some(code) => self.exited(code),
            None => self.aborted(termination_message(&output.status)),
        };

        result.with_output(&stdout, &stderr)
    }

    fn exited(&self, code: i32) -> CheckResult {
        CheckResult::exited(
            &self.spec.name,
            &self.spec.memo,
            self.spec.command.clone(),
            code,
        )
    }
}

#[async_trait]
impl CheckTask for CommandCheckTask {
    fn name(&self) -> &str {
        &self.spec.name
    }

    async fn check(&self) -> CheckResult {
        let Some(command) = self.build_command() else {
            warn!(name = %self.spec.name, "Check has no command to execute");
            return self.aborted("command is empty".to_string());
        };

        let started = Instant::now();
        debug!(
            name = %self.spec.name,
            command = %self.spec.command,
            "Starting check command"
        );

        let result = match self.spawn_and_wait(command).await {
            Ok(output) => self.build_result(output),
            Err(error) => {
                warn!(name = %self.spec.name, error = %error, "Check command could not run");
                self.aborted(error)
            }
        };

        info!(
            name = %self.spec.name,
            duration_ms = %started.elapsed().as_millis(),
            exit_code = ?result.exit_code(),
            failing = result.is_failing(),
            "Check command completed"
        );

        result
    }

    fn aborted(&self, error: String) -> CheckResult {
        CheckResult::aborted(
            &self.spec.name,
            &self.spec.memo,
            self.spec.command.clone(),
            error,
        )
    }
}

#[cfg(unix)]
const SHELL: &str = "/bin/sh";
#[cfg(unix)]
const SHELL_ARGS: &[&str] = &["-c"];

#[cfg(windows)]
const SHELL: &str = "cmd";
#[cfg(windows)]
const SHELL_ARGS: &[&str] = &["/U", "/c"];

#[cfg(unix)]
fn termination_message(status: &std::process::ExitStatus) -> String {
    use std::os::unix::process::ExitStatusExt;

    match status.signal() {
        Some(signal) => format!("terminated by signal {}", signal),
        None => format!("exited without a status code ({})", status),
    }
}

#[cfg(not(unix))]
fn termination_message(status: &std::process::ExitStatus) -> String {
    format!("exited without a status code ({})", status)
}
