//! Persisting the skill configuration.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Local};

use crate::error::{SetupError, Result};

use super::schema::AlertConfig;

/// Render the document with a generation header.
pub fn render_config(config: &AlertConfig, generated_at: DateTime<Local>) -> Result<String> {
    let body = serde_yaml::to_string(config).map_err(|e| SetupError::ConfigWriteError {
        path: Default::default(),
        message: e.to_string(),
    })?;

    Ok(format!(
        "# temperature-alert configuration\n# Generated by tempalert-setup on {}\n{}",
        generated_at.format("%Y-%m-%d %H:%M:%S"),
        body
    ))
}

/// Write `config` to `path`, creating parent directories.
///
/// Credentials are written in cleartext; on unix the file is restricted
/// to the owner.
pub fn write_config(path: &Path, config: &AlertConfig) -> Result<()> {
    let content = render_config(config, Local::now()).map_err(|e| match e {
        SetupError::ConfigWriteError { message, .. } => SetupError::ConfigWriteError {
            path: path.to_path_buf(),
            message,
        },
        other => other,
    })?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = open_private(path)?;
    restrict_permissions(path)?;
    file.write_all(content.as_bytes())?;

    tracing::debug!("Wrote skill config to {}", path.display());
    Ok(())
}

/// Open `path` for writing, truncated. New files are created owner-only.
#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<File> {
    File::create(path)
}

/// Existing files keep their mode on open; tighten it before writing.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::TelegramChannel;
    use tempfile::TempDir;

    #[test]
    fn write_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp
            .path()
            .join(".openclaw/skills/temperature-alert/config.yaml");

        write_config(&path, &AlertConfig::with_defaults()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# temperature-alert configuration"));
        let parsed: AlertConfig = serde_yaml::from_str(&content).unwrap();
        assert_eq!(parsed, AlertConfig::with_defaults());
    }

    #[test]
    fn rewriting_overwrites_previous_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");

        let mut cfg = AlertConfig::with_defaults();
        cfg.notifications.telegram = Some(TelegramChannel {
            enabled: true,
            bot_token: "123:abc".into(),
            chat_id: "42".into(),
        });
        write_config(&path, &cfg).unwrap();
        write_config(&path, &AlertConfig::with_defaults()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("telegram"));
    }

    #[cfg(unix)]
    #[test]
    fn file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        write_config(&path, &AlertConfig::with_defaults()).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn new_file_is_owner_only_before_any_content() {
        use std::os::unix::fs::PermissionsExt;
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");

        let _file = open_private(&path).unwrap();

        let meta = fs::metadata(&path).unwrap();
        assert_eq!(meta.len(), 0);
        assert_eq!(meta.permissions().mode() & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn existing_readable_file_is_tightened() {
        use std::os::unix::fs::PermissionsExt;
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "old: true\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_config(&path, &AlertConfig::with_defaults()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(!fs::read_to_string(&path).unwrap().contains("old: true"));
    }

    #[test]
    fn render_includes_timestamp_header() {
        let at = Local::now();
        let text = render_config(&AlertConfig::with_defaults(), at).unwrap();
        assert!(text.contains(&at.format("%Y-%m-%d").to_string()));
        assert!(text.contains("sensor_type: DS18B20"));
    }
}
