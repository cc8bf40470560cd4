//! Skill configuration document.
//!
//! These structs map to `config.yaml` consumed by the temperature-alert
//! skill. Field order is serialization order: the `config` block comes
//! first, then `notifications` with email before telegram.

use serde::{Deserialize, Serialize};

/// Default upper alert threshold in °C.
pub const DEFAULT_HIGH_THRESHOLD: f64 = 35.0;
/// Default lower alert threshold in °C.
pub const DEFAULT_LOW_THRESHOLD: f64 = 5.0;
/// Rate-of-change threshold in °C per reading interval. Not prompted.
pub const DEFAULT_RATE_THRESHOLD: f64 = 5.0;
/// Minimum minutes between repeated alerts. Not prompted.
pub const DEFAULT_COOLDOWN_MINUTES: u32 = 15;
/// Sensor id used when nothing was detected and the user enters nothing.
pub const DEFAULT_SENSOR_ID: &str = "temp_01";
/// Sensor type for 1-Wire probes and manually entered ids.
pub const SENSOR_TYPE_DS18B20: &str = "DS18B20";
/// Sensor type for simulated sensors.
pub const SENSOR_TYPE_VIRTUAL: &str = "virtual";
/// Default SMTP relay.
pub const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";
/// Default SMTP submission port.
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Root of `config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Thresholds and sensor selection.
    pub config: MonitorSettings,

    /// Enabled notification channels. Omitted when none are enabled.
    #[serde(default, skip_serializing_if = "Notifications::is_empty")]
    pub notifications: Notifications,
}

/// Alert thresholds and the monitored sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSettings {
    pub high_threshold: f64,
    pub low_threshold: f64,
    pub rate_threshold: f64,
    pub cooldown_minutes: u32,
    pub sensor_id: String,
    pub sensor_type: String,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            low_threshold: DEFAULT_LOW_THRESHOLD,
            rate_threshold: DEFAULT_RATE_THRESHOLD,
            cooldown_minutes: DEFAULT_COOLDOWN_MINUTES,
            sensor_id: DEFAULT_SENSOR_ID.to_string(),
            sensor_type: SENSOR_TYPE_DS18B20.to_string(),
        }
    }
}

/// Notification channels; only the two known kinds exist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notifications {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailChannel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<TelegramChannel>,
}

impl Notifications {
    /// True when no channel is enabled.
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.telegram.is_none()
    }

    /// Names of the enabled channels, in serialization order.
    pub fn enabled_channels(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.email.is_some() {
            names.push("email");
        }
        if self.telegram.is_some() {
            names.push("telegram");
        }
        names
    }
}

/// SMTP credentials and addressing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailChannel {
    pub enabled: bool,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub username: String,
    /// Stored in cleartext; the skill reads it verbatim.
    pub password: String,
    pub from_email: String,
    pub to_email: String,
}

/// Telegram bot credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelegramChannel {
    pub enabled: bool,
    /// Stored in cleartext; the skill reads it verbatim.
    pub bot_token: String,
    pub chat_id: String,
}

impl AlertConfig {
    /// Configuration with every default and no notification channels.
    pub fn with_defaults() -> Self {
        Self {
            config: MonitorSettings::default(),
            notifications: Notifications::default(),
        }
    }

    /// Credential values that must never appear in logs or summaries.
    pub fn secret_values(&self) -> Vec<String> {
        let mut secrets = Vec::new();
        if let Some(email) = &self.notifications.email {
            secrets.push(email.password.clone());
        }
        if let Some(telegram) = &self.notifications.telegram {
            secrets.push(telegram.bot_token.clone());
        }
        secrets.retain(|s| !s.is_empty());
        secrets
    }
}
