//! Sensors command implementation.
//!
//! The `tempalert-setup sensors` command runs detection alone, without
//! touching the system or asking questions.

use crate::cli::args::SensorsArgs;
use crate::config::SetupPaths;
use crate::error::{SetupError, Result};
use crate::requirements::probe::resolve_tool_path;
use crate::sensors::{i2c, onewire, DetectionReport, SensorDetector};
use crate::shell::CommandRunner;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The sensors command implementation.
pub struct SensorsCommand<'a> {
    paths: SetupPaths,
    args: SensorsArgs,
    runner: &'a dyn CommandRunner,
}

impl<'a> SensorsCommand<'a> {
    /// Create a new sensors command.
    pub fn new(paths: &SetupPaths, args: SensorsArgs, runner: &'a dyn CommandRunner) -> Self {
        Self {
            paths: args.paths.apply(paths.clone()),
            args,
            runner,
        }
    }

    fn i2c_available(&self) -> bool {
        resolve_tool_path("i2cdetect", &self.paths.search_path).is_some()
    }

    /// Detection without UI output, for machine-readable results.
    fn detect_quietly(&self) -> DetectionReport {
        let scan = onewire::scan(&self.paths.w1_devices);
        let i2c_devices = if self.i2c_available() {
            i2c::probe(self.runner, self.paths.i2c_bus)
        } else {
            None
        };
        DetectionReport {
            sensors: scan.sensors,
            unresponsive: scan.unresponsive,
            i2c_devices,
        }
    }
}

impl Command for SensorsCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.json {
            let report = self.detect_quietly();
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| SetupError::Other(anyhow::anyhow!("Failed to encode sensors: {}", e)))?;
            println!("{}", json);
            return Ok(CommandResult::success());
        }

        ui.show_header("Sensors");
        let report = SensorDetector::new(
            self.paths.w1_devices.clone(),
            self.paths.i2c_bus,
            self.runner,
        )
        .detect(self.i2c_available(), ui);

        if report.sensors.is_empty() {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
