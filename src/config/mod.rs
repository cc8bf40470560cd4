//! Configuration: where the wizard works and what it writes.
//!
//! - [`paths`] - host locations (with CLI/env overrides applied by the caller)
//! - [`schema`] - the skill's `config.yaml` document
//! - [`writer`] - serialization to disk

pub mod paths;
pub mod schema;
pub mod writer;

pub use paths::{SetupPaths, SKILL_MANIFEST, SKILL_NAME};
pub use schema::{
    AlertConfig, EmailChannel, MonitorSettings, Notifications, TelegramChannel,
    DEFAULT_HIGH_THRESHOLD, DEFAULT_LOW_THRESHOLD, DEFAULT_SENSOR_ID, DEFAULT_SMTP_PORT,
    DEFAULT_SMTP_SERVER, SENSOR_TYPE_DS18B20, SENSOR_TYPE_VIRTUAL,
};
pub use writer::{render_config, write_config};
