//! Dependency detection.
//!
//! # Modules
//!
//! - [`probe`] - search-path lookup for executables
//! - [`resolver`] - required commands, agent selection, optional tools
//! - [`installer`] - best-effort Python package install

pub mod installer;
pub mod probe;
pub mod resolver;

pub use installer::{install_python_packages, InstallOutcome, SKILL_PYTHON_PACKAGES};
pub use resolver::{optional_hint, AgentCommand, AgentKind, DependencySet, Resolution};
