//! Dependency resolution.
//!
//! Required commands must all resolve; every missing one is collected so the
//! user sees the full list at once. Agent alternatives are tried in priority
//! order and the first that resolves decides how the agent is invoked later.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use crate::error::{SetupError, Result};
use crate::shell::CommandLine;

use super::probe::resolve_tool_path;

/// Known agent front-ends, each owning skill lifecycle commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    /// Globally installed `openclaw` binary.
    OpenClaw,
    /// Legacy `clawdbot` binary.
    ClawdBot,
    /// `openclaw` run through `npx` without a global install.
    Npx,
}

impl AgentKind {
    /// Default priority order.
    pub const PRIORITY: [AgentKind; 3] = [AgentKind::OpenClaw, AgentKind::ClawdBot, AgentKind::Npx];

    /// Executable looked up on the search path.
    pub fn binary(&self) -> &'static str {
        match self {
            AgentKind::OpenClaw => "openclaw",
            AgentKind::ClawdBot => "clawdbot",
            AgentKind::Npx => "npx",
        }
    }

    /// Words placed before `skill ...` when invoking the agent.
    pub fn prefix(&self) -> &'static [&'static str] {
        match self {
            AgentKind::OpenClaw => &["openclaw"],
            AgentKind::ClawdBot => &["clawdbot"],
            AgentKind::Npx => &["npx", "openclaw"],
        }
    }

    /// Directory name under `$HOME` (without the leading dot) where the
    /// agent keeps installed skills.
    pub fn home_dir_name(&self) -> &'static str {
        match self {
            AgentKind::OpenClaw | AgentKind::Npx => "openclaw",
            AgentKind::ClawdBot => "clawdbot",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix().join(" "))
    }
}

/// The selected agent and where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentCommand {
    pub kind: AgentKind,
    pub path: PathBuf,
}

impl AgentCommand {
    /// Build `<prefix> <args...>`.
    pub fn command<I, S>(&self, args: I) -> CommandLine
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prefix = self.kind.prefix();
        let mut all: Vec<String> = prefix[1..].iter().map(|s| s.to_string()).collect();
        all.extend(args.into_iter().map(Into::into));
        CommandLine::new(prefix[0], all)
    }
}

/// What the pipeline needs from the host.
#[derive(Debug, Clone)]
pub struct DependencySet {
    /// Commands that must all be present.
    pub required: Vec<String>,
    /// Agent alternatives in priority order; exactly one is selected.
    pub agents: Vec<AgentKind>,
    /// Commands whose absence only disables a feature.
    pub optional: Vec<String>,
}

impl Default for DependencySet {
    fn default() -> Self {
        Self {
            required: vec!["python3".into(), "modprobe".into()],
            agents: AgentKind::PRIORITY.to_vec(),
            optional: vec!["gpio".into(), "i2cdetect".into(), "pip3".into()],
        }
    }
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The first agent alternative that resolved.
    pub agent: AgentCommand,
    /// Optional commands that were found.
    pub optional_found: BTreeSet<String>,
    /// Optional commands that were not found.
    pub optional_missing: Vec<String>,
}

impl Resolution {
    /// Check whether an optional command is available.
    pub fn has(&self, tool: &str) -> bool {
        self.optional_found.contains(tool)
    }
}

impl DependencySet {
    /// Resolve every dependency against `path_entries`.
    ///
    /// Fails with [`SetupError::MissingDependencies`] listing every missing
    /// required command plus the agent alternatives when none resolved.
    pub fn resolve(&self, path_entries: &[PathBuf]) -> Result<Resolution> {
        let mut missing: Vec<String> = self
            .required
            .iter()
            .filter(|name| resolve_tool_path(name, path_entries).is_none())
            .cloned()
            .collect();

        let agent = self.agents.iter().find_map(|kind| {
            resolve_tool_path(kind.binary(), path_entries).map(|path| AgentCommand {
                kind: *kind,
                path,
            })
        });

        if agent.is_none() {
            let names: Vec<&str> = self.agents.iter().map(|k| k.binary()).collect();
            missing.push(format!("one of: {}", names.join(", ")));
        }

        let agent = match agent {
            Some(agent) if missing.is_empty() => agent,
            _ => return Err(SetupError::MissingDependencies { missing }),
        };

        let (found, not_found): (Vec<&String>, Vec<&String>) = self
            .optional
            .iter()
            .partition(|name| resolve_tool_path(name, path_entries).is_some());

        tracing::debug!("Selected agent '{}' at {}", agent.kind, agent.path.display());

        Ok(Resolution {
            agent,
            optional_found: found.into_iter().cloned().collect(),
            optional_missing: not_found.into_iter().cloned().collect(),
        })
    }
}

/// Why an optional command matters, for the warning shown when it is missing.
pub fn optional_hint(tool: &str) -> &'static str {
    match tool {
        "gpio" => "GPIO diagnostics unavailable (install wiringpi or pigpio)",
        "i2cdetect" => "I2C bus probe will be skipped (install i2c-tools)",
        "pip3" => "Python packages for the skill cannot be installed automatically",
        _ => "feature disabled",
    }
}
