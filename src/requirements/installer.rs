//! Best-effort installation of the skill's Python packages.
//!
//! Failures here are never fatal: the packages are often already present
//! through the system package manager, which pip cannot see.

use crate::shell::{CommandLine, CommandOptions, CommandRunner};
use crate::ui::UserInterface;

/// Python packages imported by the temperature-alert skill.
pub const SKILL_PYTHON_PACKAGES: &[&str] = &["PyYAML", "requests"];

/// Outcome of a best-effort install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    Failed,
    Skipped,
}

/// Install `packages` with `pip3 install --user`, warning on failure.
pub fn install_python_packages(
    packages: &[&str],
    pip_available: bool,
    runner: &dyn CommandRunner,
    ui: &mut dyn UserInterface,
) -> InstallOutcome {
    if packages.is_empty() {
        return InstallOutcome::Skipped;
    }
    if !pip_available {
        ui.warning(&format!(
            "pip3 not found; install manually if missing: {}",
            packages.join(" ")
        ));
        return InstallOutcome::Skipped;
    }

    let mut args = vec!["install", "--user", "--quiet"];
    args.extend_from_slice(packages);
    let command = CommandLine::new("pip3", args);

    let mut spinner = ui.start_spinner(&format!("Installing {}", packages.join(", ")));
    match runner.run(&command, &CommandOptions::captured()) {
        Ok(result) if result.success => {
            spinner.finish_success("Python packages installed");
            InstallOutcome::Installed
        }
        Ok(result) => {
            spinner.finish_skipped("Python package install failed");
            tracing::debug!("pip3 stderr: {}", result.stderr.trim());
            ui.warning(&format!(
                "'{}' exited with {:?}; packages may already be installed system-wide",
                command, result.exit_code
            ));
            InstallOutcome::Failed
        }
        Err(e) => {
            spinner.finish_skipped("Python package install failed");
            ui.warning(&format!("Could not run pip3: {}", e));
            InstallOutcome::Failed
        }
    }
}
