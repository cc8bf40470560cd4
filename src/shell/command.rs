//! External command execution.
//!
//! Commands are spawned directly from a program name and argument vector;
//! nothing is passed through a shell, so ids and paths never need quoting.

use crate::error::{SetupError, Result};
use std::fmt;
use std::io::Write;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// A program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Executable name or path.
    pub program: String,
    /// Arguments passed verbatim.
    pub args: Vec<String>,
}

impl CommandLine {
    /// Create a command line from a program and arguments.
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Prefix this command with `sudo`.
    pub fn elevated(self) -> Self {
        let mut args = Vec::with_capacity(self.args.len() + 1);
        args.push(self.program);
        args.extend(self.args);
        Self {
            program: "sudo".to_string(),
            args,
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Capture stdout and stderr (if false, both are inherited from the parent).
    pub capture: bool,

    /// Text written to the child's stdin.
    pub stdin: Option<String>,
}

impl CommandOptions {
    /// Capture all output.
    pub fn captured() -> Self {
        Self {
            capture: true,
            stdin: None,
        }
    }
}

/// Seam for running external programs.
///
/// Stages never spawn processes directly so tests can substitute a recorder.
pub trait CommandRunner {
    /// Run a command to completion.
    ///
    /// Returns `Err` only when the program could not be started; a non-zero
    /// exit is reported through [`CommandResult::success`].
    fn run(&self, command: &CommandLine, options: &CommandOptions) -> Result<CommandResult>;
}

/// Runs commands on the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandLine, options: &CommandOptions) -> Result<CommandResult> {
        execute(command, options)
    }
}

/// Execute a command.
pub fn execute(command: &CommandLine, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    tracing::debug!("Running: {}", command);

    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args);

    if options.capture {
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());
    }

    if options.stdin.is_some() {
        cmd.stdin(Stdio::piped());
    }

    let spawn_failed = |_| SetupError::CommandFailed {
        command: command.to_string(),
        code: None,
    };

    let mut child = cmd.spawn().map_err(spawn_failed)?;

    if let Some(input) = &options.stdin {
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes())?;
        }
    }

    let output = child.wait_with_output().map_err(spawn_failed)?;
    let duration = start.elapsed();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        tracing::debug!("{} exited with {:?}", command, output.status.code());
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_program_and_args() {
        let cmd = CommandLine::new("npx", ["openclaw", "skill", "status"]);
        assert_eq!(cmd.to_string(), "npx openclaw skill status");
    }

    #[test]
    fn elevated_prepends_sudo() {
        let cmd = CommandLine::new("modprobe", ["w1-gpio"]).elevated();
        assert_eq!(cmd.program, "sudo");
        assert_eq!(cmd.args, vec!["modprobe", "w1-gpio"]);
    }

    #[cfg(unix)]
    #[test]
    fn execute_successful_command() {
        let result = execute(
            &CommandLine::new("echo", ["hello"]),
            &CommandOptions::captured(),
        )
        .unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[cfg(unix)]
    #[test]
    fn execute_failing_command() {
        let result = execute(&CommandLine::new("false", Vec::<String>::new()), &CommandOptions::captured())
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(1));
    }

    #[cfg(unix)]
    #[test]
    fn execute_feeds_stdin() {
        let options = CommandOptions {
            capture: true,
            stdin: Some("dtoverlay=w1-gpio\n".to_string()),
        };
        let result = execute(&CommandLine::new("cat", Vec::<String>::new()), &options).unwrap();
        assert_eq!(result.stdout, "dtoverlay=w1-gpio\n");
    }

    #[test]
    fn missing_program_is_an_error() {
        let err = execute(
            &CommandLine::new("this-command-does-not-exist-12345", Vec::<String>::new()),
            &CommandOptions::captured(),
        )
        .unwrap_err();
        assert!(matches!(err, SetupError::CommandFailed { code: None, .. }));
    }
}
