//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations:
//! - `setup` (default) runs the provisioning pipeline
//! - `sensors` runs detection alone
//! - `status`, `logs`, `config` forward to the agent
//! - `completions` prints a shell completion script

pub mod completions;
pub mod dispatcher;
pub mod sensors;
pub mod setup;
pub mod skill;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
