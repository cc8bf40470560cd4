//! Skill query commands.
//!
//! `status`, `logs` and `config` forward to the agent's own
//! `skill <query>` and mirror its exit code.

use crate::agent::{SkillDelegate, SkillQuery};
use crate::config::SetupPaths;
use crate::error::Result;
use crate::requirements::{AgentKind, DependencySet};
use crate::shell::CommandRunner;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Forwards a read-only query to the installed agent.
pub struct SkillCommand<'a> {
    paths: SetupPaths,
    query: SkillQuery,
    runner: &'a dyn CommandRunner,
}

impl<'a> SkillCommand<'a> {
    /// Create a new skill query command.
    pub fn new(paths: &SetupPaths, query: SkillQuery, runner: &'a dyn CommandRunner) -> Self {
        Self {
            paths: paths.clone(),
            query,
            runner,
        }
    }
}

impl Command for SkillCommand<'_> {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let agents_only = DependencySet {
            required: Vec::new(),
            agents: AgentKind::PRIORITY.to_vec(),
            optional: Vec::new(),
        };
        let resolution = agents_only.resolve(&self.paths.search_path)?;

        let result = SkillDelegate::new(&resolution.agent, self.runner).query(self.query)?;
        if result.success {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(result.exit_code.unwrap_or(1)))
        }
    }
}
