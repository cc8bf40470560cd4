//! Sensor discovery.
//!
//! DS18B20 thermometers are found on the 1-Wire bus and read once. The I2C
//! bus is probed separately and only reported as a device count.

pub mod i2c;
pub mod onewire;

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::shell::CommandRunner;
use crate::ui::UserInterface;

pub use i2c::count_addresses;
pub use onewire::{parse_reading, OneWireScan, Reading, DS18B20_PREFIX};

/// Bus a sensor is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BusType {
    OneWire,
    I2c,
    Virtual,
}

impl fmt::Display for BusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusType::OneWire => write!(f, "1-Wire"),
            BusType::I2c => write!(f, "I2C"),
            BusType::Virtual => write!(f, "virtual"),
        }
    }
}

/// A discovered sensor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sensor {
    pub id: String,
    pub bus: BusType,
    /// Last reading in degrees Celsius, if one was available.
    pub temperature: Option<f64>,
}

impl Sensor {
    /// Reading formatted for display, e.g. `21.9°C` or `n/a`.
    pub fn display_temperature(&self) -> String {
        match self.temperature {
            Some(t) => format!("{:.1}°C", t),
            None => "n/a".to_string(),
        }
    }
}

/// Everything the detection stage found.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetectionReport {
    pub sensors: Vec<Sensor>,
    pub unresponsive: Vec<String>,
    /// Responding I2C addresses; `None` when the probe did not run.
    pub i2c_devices: Option<usize>,
}

/// Finds attached sensors.
pub struct SensorDetector<'a> {
    w1_devices: PathBuf,
    i2c_bus: u8,
    runner: &'a dyn CommandRunner,
}

impl<'a> SensorDetector<'a> {
    pub fn new(w1_devices: PathBuf, i2c_bus: u8, runner: &'a dyn CommandRunner) -> Self {
        Self {
            w1_devices,
            i2c_bus,
            runner,
        }
    }

    /// Scan both buses. `probe_i2c` is false when `i2cdetect` is unavailable.
    pub fn detect(&self, probe_i2c: bool, ui: &mut dyn UserInterface) -> DetectionReport {
        let scan = onewire::scan(&self.w1_devices);

        if let Some(err) = &scan.bus_error {
            ui.warning(&format!(
                "Cannot read 1-Wire bus at {}: {}",
                self.w1_devices.display(),
                err
            ));
        } else if !scan.bus_present {
            ui.warning(&format!(
                "1-Wire bus not found at {} (interface may need a reboot)",
                self.w1_devices.display()
            ));
        }
        for id in &scan.unresponsive {
            ui.warning(&format!("Sensor {} did not respond", id));
        }
        for sensor in &scan.sensors {
            ui.success(&format!(
                "Found {} sensor {} ({})",
                sensor.bus,
                sensor.id,
                sensor.display_temperature()
            ));
        }
        if scan.bus_present && scan.sensors.is_empty() {
            ui.warning("No DS18B20 sensors detected");
        }

        let i2c_devices = if probe_i2c {
            let count = i2c::probe(self.runner, self.i2c_bus);
            match count {
                Some(n) => ui.message(&format!("I2C bus {}: {} device(s) found", self.i2c_bus, n)),
                None => ui.warning(&format!("Could not probe I2C bus {}", self.i2c_bus)),
            }
            count
        } else {
            tracing::debug!("Skipping I2C probe");
            None
        };

        DetectionReport {
            sensors: scan.sensors,
            unresponsive: scan.unresponsive,
            i2c_devices,
        }
    }
}
