//! Recording command runner for tests.
//!
//! `MockRunner` never spawns anything. Each call is recorded and answered
//! from rules matched against the rendered command line.
//!
//! # Example
//!
//! ```
//! use tempalert_setup::shell::{CommandLine, CommandOptions, CommandRunner, MockRunner};
//!
//! let runner = MockRunner::new();
//! runner.fail_when("skill install", 3);
//!
//! let ok = runner
//!     .run(&CommandLine::new("openclaw", ["skill", "status"]), &CommandOptions::captured())
//!     .unwrap();
//! assert!(ok.success);
//!
//! let failed = runner
//!     .run(&CommandLine::new("openclaw", ["skill", "install", "dir"]), &CommandOptions::captured())
//!     .unwrap();
//! assert_eq!(failed.exit_code, Some(3));
//! assert_eq!(runner.calls().len(), 2);
//! ```

use std::cell::RefCell;
use std::time::Duration;

use crate::error::Result;

use super::command::{CommandLine, CommandOptions, CommandResult, CommandRunner};

#[derive(Debug, Clone)]
struct Rule {
    needle: String,
    exit_code: i32,
    stdout: String,
}

/// A command runner that records invocations instead of executing them.
///
/// Unmatched commands succeed with empty output.
#[derive(Debug, Default)]
pub struct MockRunner {
    rules: RefCell<Vec<Rule>>,
    calls: RefCell<Vec<(CommandLine, Option<String>)>>,
}

impl MockRunner {
    /// Create a runner where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands whose rendered line contains `needle` exit with `exit_code`.
    pub fn fail_when(&self, needle: &str, exit_code: i32) {
        self.rules.borrow_mut().push(Rule {
            needle: needle.to_string(),
            exit_code,
            stdout: String::new(),
        });
    }

    /// Commands whose rendered line contains `needle` succeed with `stdout`.
    pub fn respond_when(&self, needle: &str, stdout: &str) {
        self.rules.borrow_mut().push(Rule {
            needle: needle.to_string(),
            exit_code: 0,
            stdout: stdout.to_string(),
        });
    }

    /// Every command run so far, rendered as a single line.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|(cmd, _)| cmd.to_string())
            .collect()
    }

    /// Stdin passed to each command, in call order.
    pub fn stdin_inputs(&self) -> Vec<Option<String>> {
        self.calls
            .borrow()
            .iter()
            .map(|(_, stdin)| stdin.clone())
            .collect()
    }

    /// Check if any recorded call contains `needle`.
    pub fn ran(&self, needle: &str) -> bool {
        self.calls().iter().any(|c| c.contains(needle))
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &CommandLine, options: &CommandOptions) -> Result<CommandResult> {
        let line = command.to_string();
        self.calls
            .borrow_mut()
            .push((command.clone(), options.stdin.clone()));

        let rule = self
            .rules
            .borrow()
            .iter()
            .find(|r| line.contains(&r.needle))
            .cloned();

        Ok(match rule {
            Some(r) if r.exit_code != 0 => {
                CommandResult::failure(Some(r.exit_code), r.stdout, String::new(), Duration::ZERO)
            }
            Some(r) => CommandResult::success(r.stdout, String::new(), Duration::ZERO),
            None => CommandResult::success(String::new(), String::new(), Duration::ZERO),
        })
    }
}
