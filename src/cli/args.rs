//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::SetupPaths;

/// Provisioning wizard for the temperature-alert skill.
#[derive(Debug, Parser)]
#[command(name = "tempalert-setup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Setup options used when no command is given
    #[command(flatten)]
    pub setup: SetupArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the setup wizard (default if no command specified)
    Setup(SetupArgs),

    /// Scan for attached temperature sensors
    Sensors(SensorsArgs),

    /// Show the installed skill's status
    Status,

    /// Show the installed skill's logs
    Logs,

    /// Show the installed skill's configuration
    Config,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Host locations, each overridable for testing or unusual layouts.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PathArgs {
    /// OS identity file
    #[arg(long, env = "TEMPALERT_OS_RELEASE", value_name = "PATH")]
    pub os_release: Option<PathBuf>,

    /// Boot configuration file receiving the 1-Wire overlay
    #[arg(long, env = "TEMPALERT_BOOT_CONFIG", value_name = "PATH")]
    pub boot_config: Option<PathBuf>,

    /// 1-Wire devices directory
    #[arg(long, env = "TEMPALERT_W1_DEVICES", value_name = "DIR")]
    pub w1_devices: Option<PathBuf>,

    /// Loaded kernel modules listing
    #[arg(long, env = "TEMPALERT_MODULES_FILE", value_name = "PATH")]
    pub modules_file: Option<PathBuf>,

    /// I2C bus number to probe
    #[arg(long, env = "TEMPALERT_I2C_BUS", value_name = "N")]
    pub i2c_bus: Option<u8>,

    /// Skill definition directory (must contain SKILL.md)
    #[arg(long, env = "TEMPALERT_SKILL_DIR", value_name = "DIR")]
    pub skill_dir: Option<PathBuf>,

    /// Home directory holding the agent's skill configs
    #[arg(long, env = "TEMPALERT_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,
}

impl PathArgs {
    /// Apply every given override on top of `paths`.
    pub fn apply(&self, mut paths: SetupPaths) -> SetupPaths {
        if let Some(p) = &self.os_release {
            paths.os_release = p.clone();
        }
        if let Some(p) = &self.boot_config {
            paths.boot_config = p.clone();
        }
        if let Some(p) = &self.w1_devices {
            paths.w1_devices = p.clone();
        }
        if let Some(p) = &self.modules_file {
            paths.modules_file = p.clone();
        }
        if let Some(bus) = self.i2c_bus {
            paths.i2c_bus = bus;
        }
        if let Some(p) = &self.skill_dir {
            paths.skill_dir = p.clone();
        }
        if let Some(p) = &self.home {
            paths.home = p.clone();
        }
        paths
    }
}

/// Arguments for the `setup` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SetupArgs {
    /// Use defaults (or TEMPALERT_PROMPT_* variables), no prompts
    #[arg(long)]
    pub non_interactive: bool,

    /// Do not touch the boot config or kernel modules
    #[arg(long)]
    pub skip_interface: bool,

    /// Skip the sensor and notification smoke tests
    #[arg(long)]
    pub skip_tests: bool,

    /// Do not install the skill's Python packages
    #[arg(long)]
    pub no_packages: bool,

    #[command(flatten)]
    pub paths: PathArgs,
}

/// Arguments for the `sensors` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SensorsArgs {
    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub paths: PathArgs,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
