//! State carried between pipeline stages.

use std::path::PathBuf;

use crate::agent::TestStatus;
use crate::config::AlertConfig;
use crate::environment::OsIdentity;
use crate::requirements::Resolution;
use crate::sensors::DetectionReport;

/// What a completed run changed and verified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupOutcome {
    /// The boot directive was newly added.
    pub reboot_required: bool,
    pub sensor_test: TestStatus,
    pub notification_test: TestStatus,
    /// The agent accepted `skill enable`.
    pub skill_enabled: bool,
}

/// Knobs for a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    /// Leave the boot config and kernel modules alone.
    pub skip_interface: bool,
    /// Skip the sensor and notification smoke tests.
    pub skip_tests: bool,
    /// Do not attempt `pip3 install`.
    pub no_packages: bool,
}

/// Everything learned so far; each stage fills in its part.
#[derive(Debug, Clone, Default)]
pub struct SetupContext {
    pub os: Option<OsIdentity>,
    pub resolution: Option<Resolution>,
    pub detection: DetectionReport,
    pub config: Option<AlertConfig>,
    pub config_path: Option<PathBuf>,
    pub outcome: SetupOutcome,
}

impl SetupContext {
    /// Whether at least one notification channel ended up enabled.
    pub fn has_notifications(&self) -> bool {
        self.config
            .as_ref()
            .is_some_and(|c| !c.notifications.is_empty())
    }
}
