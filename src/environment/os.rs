//! Operating system identity.
//!
//! Reads an os-release style record and classifies the distribution.
//! An unsupported distribution is only a warning; an unreadable record
//! is fatal.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SetupError, Result};

/// Distributions the skill has been tested on.
pub const SUPPORTED_DISTRIBUTIONS: &[&str] = &["raspbian", "debian", "ubuntu"];

/// Identity fields read from os-release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsIdentity {
    /// Lowercase distribution id (`ID=`).
    pub id: String,
    /// Human-readable name (`PRETTY_NAME=`, falling back to `NAME=` then the id).
    pub pretty_name: String,
}

impl OsIdentity {
    /// Check the id against [`SUPPORTED_DISTRIBUTIONS`].
    pub fn is_supported(&self) -> bool {
        SUPPORTED_DISTRIBUTIONS.contains(&self.id.as_str())
    }
}

/// Reads the host identity record.
pub struct SystemProbe {
    path: PathBuf,
}

impl SystemProbe {
    /// Probe the record at `path` (normally `/etc/os-release`).
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and parse the identity record.
    pub fn identify(&self) -> Result<OsIdentity> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| SetupError::SystemIdentityUnreadable {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        parse_os_release(&content).ok_or_else(|| SetupError::SystemIdentityUnreadable {
            path: self.path.clone(),
            message: "no ID field".to_string(),
        })
    }
}

/// Parse os-release `KEY=value` lines. Returns `None` without an `ID`.
pub fn parse_os_release(content: &str) -> Option<OsIdentity> {
    let fields: HashMap<&str, String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), unquote(value.trim())))
        .collect();

    let id = fields.get("ID")?.to_lowercase();
    if id.is_empty() {
        return None;
    }

    let pretty_name = fields
        .get("PRETTY_NAME")
        .or_else(|| fields.get("NAME"))
        .cloned()
        .unwrap_or_else(|| id.clone());

    Some(OsIdentity { id, pretty_name })
}

fn unquote(value: &str) -> String {
    let stripped = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value);
    stripped.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const RASPBIAN: &str = r#"PRETTY_NAME="Raspbian GNU/Linux 11 (bullseye)"
NAME="Raspbian GNU/Linux"
VERSION_ID="11"
ID=raspbian
ID_LIKE=debian
"#;

    #[test]
    fn parses_quoted_fields() {
        let identity = parse_os_release(RASPBIAN).unwrap();
        assert_eq!(identity.id, "raspbian");
        assert_eq!(identity.pretty_name, "Raspbian GNU/Linux 11 (bullseye)");
        assert!(identity.is_supported());
    }

    #[test]
    fn unsupported_distribution_is_classified() {
        let identity = parse_os_release("ID=fedora\nNAME='Fedora Linux'\n").unwrap();
        assert_eq!(identity.pretty_name, "Fedora Linux");
        assert!(!identity.is_supported());
    }

    #[test]
    fn pretty_name_falls_back_to_id() {
        let identity = parse_os_release("ID=ubuntu\n").unwrap();
        assert_eq!(identity.pretty_name, "ubuntu");
        assert!(identity.is_supported());
    }

    #[test]
    fn missing_id_is_none() {
        assert!(parse_os_release("NAME=Something\n# ID=debian\n").is_none());
    }

    #[test]
    fn unreadable_record_is_fatal() {
        let temp = TempDir::new().unwrap();
        let probe = SystemProbe::new(&temp.path().join("os-release"));
        let err = probe.identify().unwrap_err();
        assert!(matches!(err, SetupError::SystemIdentityUnreadable { .. }));
        assert!(err.to_string().contains("os-release"));
    }

    #[test]
    fn record_without_id_is_fatal() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("os-release");
        std::fs::write(&path, "NAME=Mystery\n").unwrap();
        let err = SystemProbe::new(&path).identify().unwrap_err();
        assert!(err.to_string().contains("no ID field"));
    }
}
