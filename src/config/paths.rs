//! Filesystem locations the wizard reads and writes.

use std::path::{Path, PathBuf};

use crate::requirements::probe::parse_system_path;

/// Name of the skill this wizard configures.
pub const SKILL_NAME: &str = "temperature-alert";

/// Skill definition manifest expected inside the skill directory.
pub const SKILL_MANIFEST: &str = "SKILL.md";

const OS_RELEASE: &str = "/etc/os-release";
const BOOT_CONFIG_FIRMWARE: &str = "/boot/firmware/config.txt";
const BOOT_CONFIG_LEGACY: &str = "/boot/config.txt";
const W1_DEVICES: &str = "/sys/bus/w1/devices";
const PROC_MODULES: &str = "/proc/modules";
const DEFAULT_I2C_BUS: u8 = 1;

/// Every host location used by the pipeline.
///
/// Production defaults come from [`SetupPaths::detect`]; the CLI overrides
/// individual fields, and tests point everything into a temp dir.
#[derive(Debug, Clone)]
pub struct SetupPaths {
    /// OS identity record (`ID=`, `PRETTY_NAME=`).
    pub os_release: PathBuf,
    /// Boot configuration file receiving the 1-Wire overlay directive.
    pub boot_config: PathBuf,
    /// 1-Wire devices directory.
    pub w1_devices: PathBuf,
    /// Loaded kernel modules list.
    pub modules_file: PathBuf,
    /// I2C bus index probed with `i2cdetect`.
    pub i2c_bus: u8,
    /// Directory holding the skill definition.
    pub skill_dir: PathBuf,
    /// Home directory under which the agent keeps its skills.
    pub home: PathBuf,
    /// Directories searched when resolving commands.
    pub search_path: Vec<PathBuf>,
}

impl SetupPaths {
    /// Production defaults for the current host.
    pub fn detect() -> Self {
        Self {
            os_release: PathBuf::from(OS_RELEASE),
            boot_config: default_boot_config(),
            w1_devices: PathBuf::from(W1_DEVICES),
            modules_file: PathBuf::from(PROC_MODULES),
            i2c_bus: DEFAULT_I2C_BUS,
            skill_dir: PathBuf::from("skills").join(SKILL_NAME),
            home: dirs::home_dir().unwrap_or_else(|| PathBuf::from("/root")),
            search_path: parse_system_path(),
        }
    }

    /// Layout rooted at `root`, mirroring the host paths underneath it.
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            os_release: root.join("etc/os-release"),
            boot_config: root.join("boot/config.txt"),
            w1_devices: root.join("sys/bus/w1/devices"),
            modules_file: root.join("proc/modules"),
            i2c_bus: DEFAULT_I2C_BUS,
            skill_dir: root.join("skills").join(SKILL_NAME),
            home: root.join("home"),
            search_path: vec![root.join("bin")],
        }
    }

    /// Path to the skill manifest.
    pub fn skill_manifest(&self) -> PathBuf {
        self.skill_dir.join(SKILL_MANIFEST)
    }

    /// Path of the generated configuration for the given agent home dir name.
    ///
    /// `<home>/.<agent>/skills/temperature-alert/config.yaml`
    pub fn skill_config(&self, agent_dir: &str) -> PathBuf {
        self.home
            .join(format!(".{}", agent_dir))
            .join("skills")
            .join(SKILL_NAME)
            .join("config.yaml")
    }
}

/// Newer Raspberry Pi OS releases moved the boot partition under `/boot/firmware`.
fn default_boot_config() -> PathBuf {
    let firmware = PathBuf::from(BOOT_CONFIG_FIRMWARE);
    if firmware.exists() {
        firmware
    } else {
        PathBuf::from(BOOT_CONFIG_LEGACY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn skill_config_follows_agent_dir() {
        let temp = TempDir::new().unwrap();
        let paths = SetupPaths::rooted_at(temp.path());
        assert_eq!(
            paths.skill_config("openclaw"),
            temp.path()
                .join("home/.openclaw/skills/temperature-alert/config.yaml")
        );
    }

    #[test]
    fn skill_manifest_lives_in_skill_dir() {
        let temp = TempDir::new().unwrap();
        let paths = SetupPaths::rooted_at(temp.path());
        assert_eq!(
            paths.skill_manifest(),
            temp.path().join("skills/temperature-alert/SKILL.md")
        );
    }

    #[test]
    fn detect_uses_host_defaults() {
        let paths = SetupPaths::detect();
        assert_eq!(paths.os_release, PathBuf::from("/etc/os-release"));
        assert_eq!(paths.w1_devices, PathBuf::from("/sys/bus/w1/devices"));
        assert_eq!(paths.i2c_bus, 1);
        assert!(paths.boot_config.ends_with("config.txt"));
    }
}
