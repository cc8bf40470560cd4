//! I2C bus probe.
//!
//! Only counts responding addresses; I2C devices are not yet a source of
//! [`Sensor`](super::Sensor) records.

use std::sync::LazyLock;

use regex::Regex;

use crate::shell::{CommandLine, CommandOptions, CommandRunner};

/// One grid row: `<hex>:` followed by its cells.
static ROW_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]{2}:(.*)$").expect("ROW_REGEX must compile"));

/// Count device addresses in `i2cdetect -y <bus>` output.
///
/// Grid cells are `--` (nothing), a hex address (device answered) or
/// `UU` (claimed by a kernel driver). The last two count.
pub fn count_addresses(output: &str) -> usize {
    output
        .lines()
        .filter_map(|line| ROW_REGEX.captures(line.trim_end()))
        .filter_map(|caps| caps.get(1))
        .flat_map(|cells| cells.as_str().split_whitespace())
        .filter(|cell| cell.eq_ignore_ascii_case("UU") || is_hex_address(cell))
        .count()
}

fn is_hex_address(cell: &str) -> bool {
    cell.len() == 2 && cell.chars().all(|c| c.is_ascii_hexdigit())
}

/// Run `i2cdetect -y <bus>` and count addresses. `None` when the probe fails.
pub fn probe(runner: &dyn CommandRunner, bus: u8) -> Option<usize> {
    let command = CommandLine::new("i2cdetect", ["-y".to_string(), bus.to_string()]);
    match runner.run(&command, &CommandOptions::captured()) {
        Ok(result) if result.success => Some(count_addresses(&result.stdout)),
        Ok(result) => {
            tracing::debug!("{} failed: {}", command, result.stderr.trim());
            None
        }
        Err(e) => {
            tracing::debug!("{} could not start: {}", command, e);
            None
        }
    }
}
