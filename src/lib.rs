//! tempalert-setup - provisioning wizard for the temperature-alert skill.
//!
//! Takes a Raspberry Pi class host from a fresh install to a running
//! temperature-alert skill: checks the system, enables the 1-Wire bus,
//! finds DS18B20 sensors, writes the skill configuration, and hands
//! install/test/enable over to the agent CLI.
//!
//! # Modules
//!
//! - [`agent`] - Skill lifecycle delegation to the agent CLI
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Host locations and the skill configuration document
//! - [`environment`] - Operating system identification
//! - [`error`] - Error types and result aliases
//! - [`interface`] - 1-Wire boot overlay and kernel modules
//! - [`requirements`] - Dependency resolution and Python packages
//! - [`runner`] - The setup pipeline
//! - [`secrets`] - Masking credentials in output
//! - [`sensors`] - 1-Wire and I2C discovery
//! - [`shell`] - External command execution
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//! - [`wizard`] - Configuration prompts
//!
//! # Example
//!
//! ```
//! use tempalert_setup::sensors::parse_reading;
//!
//! let reading = parse_reading("72 01 4b 46 7f ff 0e 10 57 : crc=57 YES\n72 01 t=23500\n");
//! assert!(reading.responsive);
//! assert_eq!(reading.temperature, Some(23.5));
//! ```
//!
//! For the full pipeline against a fake host, see the integration tests.

pub mod agent;
pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod interface;
pub mod requirements;
pub mod runner;
pub mod secrets;
pub mod sensors;
pub mod shell;
pub mod ui;
pub mod wizard;

pub use error::{Result, SetupError};
