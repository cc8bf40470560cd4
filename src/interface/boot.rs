//! Boot configuration directive.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::shell::{CommandLine, CommandOptions, CommandRunner};

/// Overlay directive that enables the 1-Wire bus on the default GPIO pin.
pub const W1_DIRECTIVE: &str = "dtoverlay=w1-gpio";

/// What happened to the boot directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveStatus {
    /// The file already contains the directive; nothing was written.
    AlreadyPresent,
    /// The directive was appended; takes effect after reboot.
    Appended,
    /// The directive is absent and could not be added.
    Failed(String),
}

/// Append [`W1_DIRECTIVE`] to `path` unless already present.
///
/// Presence is a substring match, so re-runs never duplicate the line.
/// When the file is not writable by this process the append goes through
/// `sudo tee -a`.
pub fn ensure_directive(path: &Path, runner: &dyn CommandRunner, elevated: bool) -> DirectiveStatus {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => return DirectiveStatus::Failed(format!("cannot read file: {}", e)),
    };

    if content.contains(W1_DIRECTIVE) {
        return DirectiveStatus::AlreadyPresent;
    }

    let separator = if content.is_empty() || content.ends_with('\n') {
        ""
    } else {
        "\n"
    };
    let line = format!("{}{}\n", separator, W1_DIRECTIVE);

    match append_direct(path, &line) {
        Ok(()) => DirectiveStatus::Appended,
        Err(e) if e.kind() == ErrorKind::PermissionDenied && !elevated => {
            append_privileged(path, &line, runner)
        }
        Err(e) => DirectiveStatus::Failed(e.to_string()),
    }
}

fn append_direct(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().append(true).open(path)?;
    file.write_all(line.as_bytes())
}

fn append_privileged(path: &Path, line: &str, runner: &dyn CommandRunner) -> DirectiveStatus {
    let command = CommandLine::new("tee", ["-a".to_string(), path.display().to_string()]).elevated();
    let options = CommandOptions {
        capture: true,
        stdin: Some(line.to_string()),
    };

    tracing::debug!("Appending boot directive with privileges: {}", command);
    match runner.run(&command, &options) {
        Ok(result) if result.success => DirectiveStatus::Appended,
        Ok(result) => DirectiveStatus::Failed(format!(
            "'{}' exited with {:?}",
            command, result.exit_code
        )),
        Err(e) => DirectiveStatus::Failed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;
    use tempfile::TempDir;

    #[test]
    fn appends_when_absent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.txt");
        fs::write(&path, "dtparam=i2c_arm=on").unwrap();

        let status = ensure_directive(&path, &MockRunner::new(), false);

        assert_eq!(status, DirectiveStatus::Appended);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "dtparam=i2c_arm=on\ndtoverlay=w1-gpio\n"
        );
    }

    #[test]
    fn existing_lines_are_kept() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.txt");
        fs::write(&path, "# comment\narm_64bit=1\n").unwrap();

        ensure_directive(&path, &MockRunner::new(), false);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# comment\narm_64bit=1\n"));
    }

    #[test]
    fn present_directive_is_left_alone() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.txt");
        fs::write(&path, "dtoverlay=w1-gpio,gpiopin=4\n").unwrap();

        let status = ensure_directive(&path, &MockRunner::new(), false);

        assert_eq!(status, DirectiveStatus::AlreadyPresent);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "dtoverlay=w1-gpio,gpiopin=4\n"
        );
    }

    #[test]
    fn missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let status = ensure_directive(&temp.path().join("nope.txt"), &MockRunner::new(), false);
        assert!(matches!(status, DirectiveStatus::Failed(_)));
    }

    #[test]
    fn privileged_append_pipes_directive_to_tee() {
        let runner = MockRunner::new();
        let status = append_privileged(Path::new("/boot/config.txt"), "dtoverlay=w1-gpio\n", &runner);

        assert_eq!(status, DirectiveStatus::Appended);
        assert_eq!(runner.calls(), vec!["sudo tee -a /boot/config.txt"]);
        assert_eq!(
            runner.stdin_inputs(),
            vec![Some("dtoverlay=w1-gpio\n".to_string())]
        );
    }

    #[test]
    fn privileged_append_failure_is_reported() {
        let runner = MockRunner::new();
        runner.fail_when("tee", 1);
        let status = append_privileged(Path::new("/boot/config.txt"), "x\n", &runner);
        assert!(matches!(status, DirectiveStatus::Failed(reason) if reason.contains("sudo tee")));
    }
}
