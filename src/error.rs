//! Error types for setup operations.
//!
//! This module defines [`SetupError`], the primary error type used throughout
//! the wizard, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Fatal preconditions (system identity, dependencies, skill manifest) get
//!   their own variants so callers can report exactly what is at fault
//! - Recoverable conditions never become errors; stages report them as
//!   warnings through the UI and keep going
//! - Use `anyhow::Error` (via `SetupError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for setup operations.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The OS identity file could not be read or carries no `ID=` field.
    #[error("Cannot determine operating system from {path}: {message}")]
    SystemIdentityUnreadable { path: PathBuf, message: String },

    /// One or more hard dependencies are not installed.
    #[error("Missing dependencies: {}", missing.join(", "))]
    MissingDependencies { missing: Vec<String> },

    /// The skill definition manifest is not where the installer expects it.
    #[error("Skill manifest not found: {path}")]
    SkillManifestMissing { path: PathBuf },

    /// An external command could not be spawned or exited non-zero.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// A prompt could not be answered (non-interactive without default, or aborted).
    #[error("Prompt '{key}' could not be answered: {message}")]
    PromptUnavailable { key: String, message: String },

    /// Failed to serialize the skill configuration.
    #[error("Failed to write config at {path}: {message}")]
    ConfigWriteError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for setup operations.
pub type Result<T> = std::result::Result<T, SetupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_identity_displays_path() {
        let err = SetupError::SystemIdentityUnreadable {
            path: PathBuf::from("/etc/os-release"),
            message: "No such file or directory".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/etc/os-release"));
        assert!(msg.contains("No such file"));
    }

    #[test]
    fn missing_dependencies_lists_every_name() {
        let err = SetupError::MissingDependencies {
            missing: vec!["python3".into(), "modprobe".into()],
        };
        assert_eq!(
            err.to_string(),
            "Missing dependencies: python3, modprobe"
        );
    }

    #[test]
    fn skill_manifest_missing_displays_path() {
        let err = SetupError::SkillManifestMissing {
            path: PathBuf::from("skills/temperature-alert/SKILL.md"),
        };
        assert!(err.to_string().contains("SKILL.md"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = SetupError::CommandFailed {
            command: "openclaw skill install skills/temperature-alert".into(),
            code: Some(2),
        };
        let msg = err.to_string();
        assert!(msg.contains("skill install"));
        assert!(msg.contains("2"));
    }

    #[test]
    fn prompt_unavailable_displays_key() {
        let err = SetupError::PromptUnavailable {
            key: "email_username".into(),
            message: "no default value".into(),
        };
        assert!(err.to_string().contains("email_username"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: SetupError = io_err.into();
        assert!(matches!(err, SetupError::Io(_)));
    }
}
