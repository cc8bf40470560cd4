//! 1-Wire bus scanning.
//!
//! The kernel exposes each slave as `<devices>/<id>/w1_slave`:
//!
//! ```text
//! 72 01 4b 46 7f ff 0e 10 57 : crc=57 YES
//! 72 01 4b 46 7f ff 0e 10 57 t=23125
//! ```
//!
//! `YES` marks a valid CRC; `t=` carries millidegrees Celsius.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::{BusType, Sensor};

/// Family code prefix of DS18B20 thermometers.
pub const DS18B20_PREFIX: &str = "28-";

/// Token marking a successful read.
const RESPONSIVE_MARKER: &str = "YES";

/// One parsed `w1_slave` read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// The device answered with a valid CRC.
    pub responsive: bool,
    /// Degrees Celsius; `None` when `t=` is missing or malformed.
    pub temperature: Option<f64>,
}

/// `t=<millidegrees>` as its own whitespace-delimited token.
static TEMPERATURE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)t=(-?\d+)(?:\s|$)").expect("TEMPERATURE_REGEX must compile")
});

/// Parse the content of a `w1_slave` file.
pub fn parse_reading(content: &str) -> Reading {
    let responsive = content
        .split_whitespace()
        .any(|token| token == RESPONSIVE_MARKER);

    let temperature = TEMPERATURE_REGEX
        .captures(content)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .map(|milli| milli as f64 / 1000.0);

    Reading {
        responsive,
        temperature,
    }
}

/// Result of scanning the devices directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OneWireScan {
    /// False when the devices directory does not exist or is unreadable.
    pub bus_present: bool,
    /// Why an existing devices directory could not be listed.
    pub bus_error: Option<String>,
    /// Responsive thermometers in id order.
    pub sensors: Vec<Sensor>,
    /// Ids of thermometers that did not answer.
    pub unresponsive: Vec<String>,
}

/// Enumerate DS18B20 devices under `devices_dir` and read each once.
pub fn scan(devices_dir: &Path) -> OneWireScan {
    let entries = match fs::read_dir(devices_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("1-Wire bus {} not present", devices_dir.display());
            return OneWireScan::default();
        }
        Err(e) => {
            tracing::debug!("1-Wire bus {} unreadable: {}", devices_dir.display(), e);
            return OneWireScan {
                bus_error: Some(e.to_string()),
                ..Default::default()
            };
        }
    };

    let mut ids: Vec<String> = entries
        .flatten()
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.starts_with(DS18B20_PREFIX))
        .collect();
    ids.sort();

    let mut scan = OneWireScan {
        bus_present: true,
        ..Default::default()
    };

    for id in ids {
        let reading = fs::read_to_string(devices_dir.join(&id).join("w1_slave"))
            .map(|content| parse_reading(&content))
            .unwrap_or(Reading {
                responsive: false,
                temperature: None,
            });

        if reading.responsive {
            scan.sensors.push(Sensor {
                id,
                bus: BusType::OneWire,
                temperature: reading.temperature,
            });
        } else {
            scan.unresponsive.push(id);
        }
    }

    scan
}
