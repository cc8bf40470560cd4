//! Setup command implementation.
//!
//! The `tempalert-setup setup` command (also the default) runs the full
//! provisioning pipeline.

use crate::cli::args::SetupArgs;
use crate::config::SetupPaths;
use crate::error::Result;
use crate::runner::{SetupOptions, SetupPipeline};
use crate::shell::CommandRunner;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The setup command implementation.
pub struct SetupCommand<'a> {
    paths: SetupPaths,
    args: SetupArgs,
    runner: &'a dyn CommandRunner,
    elevated: bool,
}

impl<'a> SetupCommand<'a> {
    /// Create a new setup command; path overrides in `args` win over `paths`.
    pub fn new(
        paths: &SetupPaths,
        args: SetupArgs,
        runner: &'a dyn CommandRunner,
        elevated: bool,
    ) -> Self {
        Self {
            paths: args.paths.apply(paths.clone()),
            args,
            runner,
            elevated,
        }
    }

    /// Resolved locations for this run.
    pub fn paths(&self) -> &SetupPaths {
        &self.paths
    }
}

impl Command for SetupCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.show_header("Temperature Alert Setup");
        tracing::debug!("Setup paths: {:?}", self.paths);

        let options = SetupOptions {
            skip_interface: self.args.skip_interface,
            skip_tests: self.args.skip_tests,
            no_packages: self.args.no_packages,
        };

        SetupPipeline::new(self.paths.clone(), options, self.runner, self.elevated).run(ui)?;
        Ok(CommandResult::success())
    }
}
