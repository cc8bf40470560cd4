//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::agent::SkillQuery;
use crate::cli::args::{Cli, Commands};
use crate::config::SetupPaths;
use crate::error::Result;
use crate::shell::{CommandRunner, SystemRunner};
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    paths: SetupPaths,
    runner: Box<dyn CommandRunner>,
    elevated: bool,
}

impl CommandDispatcher {
    /// Create a dispatcher running real commands against `paths`.
    pub fn new(paths: SetupPaths, elevated: bool) -> Self {
        Self {
            paths,
            runner: Box::new(SystemRunner),
            elevated,
        }
    }

    /// Substitute the command runner.
    pub fn with_runner(mut self, runner: Box<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Host locations before per-command overrides.
    pub fn paths(&self) -> &SetupPaths {
        &self.paths
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it. No subcommand runs setup with the top-level flags.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let runner = self.runner.as_ref();
        match &cli.command {
            Some(Commands::Setup(args)) => {
                let cmd = super::setup::SetupCommand::new(&self.paths, args.clone(), runner, self.elevated);
                cmd.execute(ui)
            }
            Some(Commands::Sensors(args)) => {
                let cmd = super::sensors::SensorsCommand::new(&self.paths, args.clone(), runner);
                cmd.execute(ui)
            }
            Some(Commands::Status) => {
                let cmd = super::skill::SkillCommand::new(&self.paths, SkillQuery::Status, runner);
                cmd.execute(ui)
            }
            Some(Commands::Logs) => {
                let cmd = super::skill::SkillCommand::new(&self.paths, SkillQuery::Logs, runner);
                cmd.execute(ui)
            }
            Some(Commands::Config) => {
                let cmd = super::skill::SkillCommand::new(&self.paths, SkillQuery::Config, runner);
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                let cmd = super::setup::SetupCommand::new(
                    &self.paths,
                    cli.setup.clone(),
                    runner,
                    self.elevated,
                );
                cmd.execute(ui)
            }
        }
    }
}
