//! Skill lifecycle delegation to the external agent CLI.
//!
//! The wizard never installs or runs the skill itself. It shells out to
//! `<agent> skill ...` and interprets the exit status:
//!
//! - `skill install <dir>`: failure aborts setup
//! - `skill test` / `skill run`: failure is reported, setup continues
//! - `skill enable`: failure is reported, setup continues

use std::fmt;
use std::path::Path;

use crate::config::{SKILL_MANIFEST, SKILL_NAME};
use crate::error::{SetupError, Result};
use crate::requirements::AgentCommand;
use crate::shell::{CommandLine, CommandOptions, CommandResult, CommandRunner};
use crate::ui::UserInterface;

/// Outcome of an optional smoke test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TestStatus {
    Passed,
    Failed,
    #[default]
    NotRun,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Passed => write!(f, "passed"),
            TestStatus::Failed => write!(f, "failed"),
            TestStatus::NotRun => write!(f, "not run"),
        }
    }
}

/// Read-only skill commands forwarded as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillQuery {
    Status,
    Logs,
    Config,
}

impl SkillQuery {
    fn subcommand(&self) -> &'static str {
        match self {
            SkillQuery::Status => "status",
            SkillQuery::Logs => "logs",
            SkillQuery::Config => "config",
        }
    }
}

/// Fail with [`SetupError::SkillManifestMissing`] unless `skill_dir`
/// holds a skill manifest.
pub fn verify_manifest(skill_dir: &Path) -> Result<()> {
    let manifest = skill_dir.join(SKILL_MANIFEST);
    if manifest.is_file() {
        Ok(())
    } else {
        Err(SetupError::SkillManifestMissing { path: manifest })
    }
}

/// Runs skill commands through the selected agent.
pub struct SkillDelegate<'a> {
    agent: &'a AgentCommand,
    runner: &'a dyn CommandRunner,
}

impl<'a> SkillDelegate<'a> {
    pub fn new(agent: &'a AgentCommand, runner: &'a dyn CommandRunner) -> Self {
        Self { agent, runner }
    }

    /// Build `<agent> skill <args...>`.
    pub fn skill_command<I, S>(&self, args: I) -> CommandLine
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut all = vec!["skill".to_string()];
        all.extend(args.into_iter().map(Into::into));
        self.agent.command(all)
    }

    /// Install the skill from `skill_dir`. Any failure is fatal.
    pub fn install(&self, skill_dir: &Path, ui: &mut dyn UserInterface) -> Result<()> {
        verify_manifest(skill_dir)?;

        let command = self.skill_command(["install".to_string(), skill_dir.display().to_string()]);
        let result = self.run_with_spinner(&command, "Installing skill", ui)?;

        if result.success {
            Ok(())
        } else {
            report_output(&result, ui);
            Err(SetupError::CommandFailed {
                command: command.to_string(),
                code: result.exit_code,
            })
        }
    }

    /// Ask the skill to read the configured sensor once.
    pub fn test_sensor(&self, ui: &mut dyn UserInterface) -> TestStatus {
        let command = self.skill_command(["test", SKILL_NAME, "--action", "read_sensor"]);
        self.smoke_test(&command, "Testing sensor read", ui)
    }

    /// Ask the skill to send a test message on every enabled channel.
    pub fn test_notifications(&self, ui: &mut dyn UserInterface) -> TestStatus {
        let command = self.skill_command(["run", SKILL_NAME, "--action", "test_notifications"]);
        self.smoke_test(&command, "Sending test notification", ui)
    }

    /// Enable the skill. Returns false (after warning) on failure.
    pub fn enable(&self, ui: &mut dyn UserInterface) -> bool {
        let command = self.skill_command(["enable", SKILL_NAME]);
        match self.run_with_spinner(&command, "Enabling skill", ui) {
            Ok(result) if result.success => true,
            Ok(result) => {
                report_output(&result, ui);
                ui.warning(&format!(
                    "Could not enable {}; run '{}' manually",
                    SKILL_NAME, command
                ));
                false
            }
            Err(e) => {
                ui.warning(&format!("Could not enable {}: {}", SKILL_NAME, e));
                false
            }
        }
    }

    /// Forward a read-only query with output going straight to the terminal.
    pub fn query(&self, query: SkillQuery) -> Result<CommandResult> {
        let command = self.skill_command([query.subcommand()]);
        tracing::debug!("Forwarding: {}", command);
        self.runner.run(&command, &CommandOptions::default())
    }

    fn smoke_test(&self, command: &CommandLine, label: &str, ui: &mut dyn UserInterface) -> TestStatus {
        match self.run_with_spinner(command, label, ui) {
            Ok(result) if result.success => TestStatus::Passed,
            Ok(result) => {
                report_output(&result, ui);
                ui.warning(&format!("{} failed: '{}' exited with {:?}", label, command, result.exit_code));
                TestStatus::Failed
            }
            Err(e) => {
                ui.warning(&format!("{} failed: {}", label, e));
                TestStatus::Failed
            }
        }
    }

    fn run_with_spinner(
        &self,
        command: &CommandLine,
        label: &str,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let options = CommandOptions {
            capture: !ui.output_mode().shows_command_output(),
            stdin: None,
        };

        let mut spinner = ui.start_spinner(label);
        let result = self.runner.run(command, &options);
        match &result {
            Ok(r) if r.success => spinner.finish_success(label),
            Ok(_) | Err(_) => spinner.finish_error(label),
        }
        result
    }
}

/// Show the tail of captured stderr (or stdout) after a failure.
fn report_output(result: &CommandResult, ui: &mut dyn UserInterface) {
    let output = if result.stderr.trim().is_empty() {
        &result.stdout
    } else {
        &result.stderr
    };
    let lines: Vec<&str> = output.lines().filter(|l| !l.trim().is_empty()).collect();
    for line in &lines[lines.len().saturating_sub(5)..] {
        ui.message(&format!("  {}", line));
    }
}
