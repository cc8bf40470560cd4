//! Interactive construction of the skill configuration.
//!
//! Every prompt has a default, so pressing enter throughout (or running
//! non-interactively) yields a valid configuration:
//!
//! | Field            | Default                        |
//! |------------------|--------------------------------|
//! | `sensor_id`      | first detected sensor, `temp_01` |
//! | `high_threshold` | 35.0                           |
//! | `low_threshold`  | 5.0                            |
//! | email            | disabled                       |
//! | telegram         | enabled, dropped if incomplete |

pub mod channels;

use crate::config::{
    AlertConfig, MonitorSettings, Notifications, DEFAULT_HIGH_THRESHOLD, DEFAULT_LOW_THRESHOLD,
    DEFAULT_SENSOR_ID, SENSOR_TYPE_DS18B20, SENSOR_TYPE_VIRTUAL,
};
use crate::error::Result;
use crate::sensors::Sensor;
use crate::ui::{Prompt, UserInterface};

pub use channels::{prompt_email, prompt_telegram};

/// Prefix marking a simulated sensor id.
const VIRTUAL_PREFIX: &str = "virtual";

/// Collects answers into an [`AlertConfig`].
pub struct ConfigBuilder<'a> {
    sensors: &'a [Sensor],
}

impl<'a> ConfigBuilder<'a> {
    /// Build against the sensors found by detection (may be empty).
    pub fn new(sensors: &'a [Sensor]) -> Self {
        Self { sensors }
    }

    /// Ask every question and assemble the configuration.
    pub fn build(&self, ui: &mut dyn UserInterface) -> Result<AlertConfig> {
        let (sensor_id, sensor_type) = self.select_sensor(ui)?;

        let high_threshold = prompt_threshold(
            ui,
            "high_threshold",
            "High temperature alert threshold (°C)",
            DEFAULT_HIGH_THRESHOLD,
        )?;
        let low_threshold = prompt_threshold(
            ui,
            "low_threshold",
            "Low temperature alert threshold (°C)",
            DEFAULT_LOW_THRESHOLD,
        )?;
        if low_threshold >= high_threshold {
            ui.warning(&format!(
                "Low threshold {} is not below high threshold {}; alerts may fire constantly",
                low_threshold, high_threshold
            ));
        }

        let notifications = Notifications {
            email: prompt_email(ui)?,
            telegram: prompt_telegram(ui)?,
        };
        if notifications.is_empty() {
            ui.warning("No notification channel enabled; alerts will only be logged");
        }

        Ok(AlertConfig {
            config: MonitorSettings {
                high_threshold,
                low_threshold,
                sensor_id,
                sensor_type,
                ..MonitorSettings::default()
            },
            notifications,
        })
    }

    /// Pick a detected sensor from a numbered menu, or ask for an id.
    ///
    /// Returns `(sensor_id, sensor_type)`.
    pub fn select_sensor(&self, ui: &mut dyn UserInterface) -> Result<(String, String)> {
        let Some(first) = self.sensors.first() else {
            let answer = ui.prompt(&Prompt::input(
                "sensor_id",
                "No sensors detected. Sensor id to monitor",
                Some(DEFAULT_SENSOR_ID),
            ))?;
            let id = match answer.as_string().trim() {
                "" => DEFAULT_SENSOR_ID.to_string(),
                id => id.to_string(),
            };
            let sensor_type = if id.starts_with(VIRTUAL_PREFIX) {
                SENSOR_TYPE_VIRTUAL
            } else {
                SENSOR_TYPE_DS18B20
            };
            return Ok((id, sensor_type.to_string()));
        };

        ui.message("Detected sensors:");
        for (index, sensor) in self.sensors.iter().enumerate() {
            ui.message(&format!(
                "  {}. {} ({})",
                index + 1,
                sensor.id,
                sensor.display_temperature()
            ));
        }

        let answer = ui.prompt(&Prompt::input("sensor_choice", "Select sensor", Some("1")))?;
        let choice = answer.as_string();
        let selected = choice
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.sensors.get(i))
            .unwrap_or_else(|| {
                tracing::debug!("Sensor choice '{}' out of range, using first", choice);
                first
            });

        Ok((selected.id.clone(), SENSOR_TYPE_DS18B20.to_string()))
    }
}

fn prompt_threshold(
    ui: &mut dyn UserInterface,
    key: &str,
    question: &str,
    default: f64,
) -> Result<f64> {
    let default_text = format!("{:.1}", default);
    let answer = ui.prompt(&Prompt::input(key, question, Some(&default_text)))?;
    let text = answer.as_string();
    let text = text.trim();

    if text.is_empty() {
        return Ok(default);
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => {
            ui.warning(&format!("Invalid number '{}', using {}", text, default_text));
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::BusType;
    use crate::ui::MockUI;

    fn sensor(id: &str) -> Sensor {
        Sensor {
            id: id.to_string(),
            bus: BusType::OneWire,
            temperature: Some(20.0),
        }
    }

    #[test]
    fn empty_answers_yield_defaults() {
        let mut ui = MockUI::new();
        ui.set_default_prompt_response("");

        let config = ConfigBuilder::new(&[]).build(&mut ui).unwrap();

        assert_eq!(config.config.high_threshold, 35.0);
        assert_eq!(config.config.low_threshold, 5.0);
        assert_eq!(config.config.rate_threshold, 5.0);
        assert_eq!(config.config.cooldown_minutes, 15);
        assert_eq!(config.config.sensor_id, "temp_01");
        assert_eq!(config.config.sensor_type, "DS18B20");
        assert!(config.notifications.is_empty());
    }

    #[test]
    fn out_of_range_choice_selects_first_sensor() {
        let sensors = vec![sensor("28-a"), sensor("28-b"), sensor("28-c")];
        let mut ui = MockUI::new();
        ui.set_prompt_response("sensor_choice", "5");

        let (id, _) = ConfigBuilder::new(&sensors).select_sensor(&mut ui).unwrap();

        assert_eq!(id, "28-a");
        assert!(!ui.was_prompted("sensor_id"));
    }

    #[test]
    fn numbered_choice_selects_sensor() {
        let sensors = vec![sensor("28-a"), sensor("28-b"), sensor("28-c")];
        let mut ui = MockUI::new();
        ui.set_prompt_response("sensor_choice", "2");

        let (id, sensor_type) = ConfigBuilder::new(&sensors).select_sensor(&mut ui).unwrap();

        assert_eq!(id, "28-b");
        assert_eq!(sensor_type, "DS18B20");
        assert!(ui.has_message("3. 28-c (20.0°C)"));
    }

    #[test]
    fn non_numeric_and_zero_choices_select_first_sensor() {
        let sensors = vec![sensor("28-a"), sensor("28-b")];
        for answer in ["abc", "0", "-1"] {
            let mut ui = MockUI::new();
            ui.set_prompt_response("sensor_choice", answer);
            let (id, _) = ConfigBuilder::new(&sensors).select_sensor(&mut ui).unwrap();
            assert_eq!(id, "28-a", "answer {:?}", answer);
        }
    }

    #[test]
    fn virtual_id_sets_virtual_type() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("sensor_id", "virtual_lab");

        let (id, sensor_type) = ConfigBuilder::new(&[]).select_sensor(&mut ui).unwrap();

        assert_eq!(id, "virtual_lab");
        assert_eq!(sensor_type, "virtual");
    }

    #[test]
    fn unparseable_threshold_warns_and_uses_default() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("high_threshold", "hot");
        ui.set_prompt_response("low_threshold", "2.5");

        let config = ConfigBuilder::new(&[]).build(&mut ui).unwrap();

        assert_eq!(config.config.high_threshold, 35.0);
        assert_eq!(config.config.low_threshold, 2.5);
        assert!(ui.has_warning("Invalid number 'hot'"));
    }

    #[test]
    fn inverted_thresholds_warn() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("high_threshold", "10");
        ui.set_prompt_response("low_threshold", "20");

        ConfigBuilder::new(&[]).build(&mut ui).unwrap();

        assert!(ui.has_warning("not below high threshold"));
    }
}
