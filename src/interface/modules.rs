//! Kernel module loading.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::shell::{CommandLine, CommandOptions, CommandRunner};

/// Modules backing the 1-Wire bus and the DS18B20 thermometer driver.
pub const W1_MODULES: &[&str] = &["w1-gpio", "w1-therm"];

/// What happened to one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleStatus {
    AlreadyLoaded(String),
    Loaded(String),
    Failed { name: String, reason: String },
}

/// Names of loaded modules from a `/proc/modules` style listing.
///
/// The kernel reports names with underscores; they are returned as-is.
pub fn loaded_modules(listing: &str) -> HashSet<String> {
    listing
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Load every module in [`W1_MODULES`] that is not already loaded.
///
/// An unreadable listing is treated as "nothing loaded"; `modprobe` is
/// a no-op for modules that already are.
pub fn ensure_modules(
    modules_file: &Path,
    runner: &dyn CommandRunner,
    elevated: bool,
) -> Vec<ModuleStatus> {
    let loaded = fs::read_to_string(modules_file)
        .map(|listing| loaded_modules(&listing))
        .unwrap_or_default();

    W1_MODULES
        .iter()
        .map(|name| {
            if loaded.contains(&name.replace('-', "_")) {
                return ModuleStatus::AlreadyLoaded(name.to_string());
            }
            load_module(name, runner, elevated)
        })
        .collect()
}

fn load_module(name: &str, runner: &dyn CommandRunner, elevated: bool) -> ModuleStatus {
    let mut command = CommandLine::new("modprobe", [name]);
    if !elevated {
        command = command.elevated();
    }

    match runner.run(&command, &CommandOptions::captured()) {
        Ok(result) if result.success => ModuleStatus::Loaded(name.to_string()),
        Ok(result) => ModuleStatus::Failed {
            name: name.to_string(),
            reason: match result.stderr.trim() {
                "" => format!("'{}' exited with {:?}", command, result.exit_code),
                stderr => stderr.to_string(),
            },
        },
        Err(e) => ModuleStatus::Failed {
            name: name.to_string(),
            reason: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;
    use tempfile::TempDir;

    const LISTING: &str = "w1_therm 28672 0 - Live 0x0000000000000000\n\
                           i2c_dev 20480 0 - Live 0x0000000000000000\n";

    #[test]
    fn parses_module_names() {
        let loaded = loaded_modules(LISTING);
        assert!(loaded.contains("w1_therm"));
        assert!(loaded.contains("i2c_dev"));
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn loads_only_missing_modules_with_sudo() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("modules");
        fs::write(&path, LISTING).unwrap();
        let runner = MockRunner::new();

        let statuses = ensure_modules(&path, &runner, false);

        assert_eq!(
            statuses,
            vec![
                ModuleStatus::Loaded("w1-gpio".into()),
                ModuleStatus::AlreadyLoaded("w1-therm".into()),
            ]
        );
        assert_eq!(runner.calls(), vec!["sudo modprobe w1-gpio"]);
    }

    #[test]
    fn root_loads_without_sudo() {
        let temp = TempDir::new().unwrap();
        let runner = MockRunner::new();

        ensure_modules(&temp.path().join("absent"), &runner, true);

        assert_eq!(runner.calls(), vec!["modprobe w1-gpio", "modprobe w1-therm"]);
    }

    #[test]
    fn failed_load_names_the_module() {
        let temp = TempDir::new().unwrap();
        let runner = MockRunner::new();
        runner.fail_when("w1-therm", 1);

        let statuses = ensure_modules(&temp.path().join("absent"), &runner, true);

        assert!(matches!(
            &statuses[1],
            ModuleStatus::Failed { name, .. } if name == "w1-therm"
        ));
    }
}
