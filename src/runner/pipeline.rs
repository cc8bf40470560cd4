//! The six-stage setup pipeline.

use crate::agent::{verify_manifest, SkillDelegate};
use crate::config::{write_config, SetupPaths};
use crate::environment::{SystemProbe, SUPPORTED_DISTRIBUTIONS};
use crate::error::{SetupError, Result};
use crate::interface::InterfaceEnabler;
use crate::requirements::{
    install_python_packages, optional_hint, DependencySet, Resolution, SKILL_PYTHON_PACKAGES,
};
use crate::sensors::SensorDetector;
use crate::shell::{CommandLine, CommandOptions, CommandRunner};
use crate::ui::{Prompt, UserInterface};
use crate::wizard::ConfigBuilder;

use super::context::{SetupContext, SetupOptions};
use super::summary::print_summary;

/// Runs every stage once, in order. Fatal errors stop the run; everything
/// else is reported as a warning.
pub struct SetupPipeline<'a> {
    paths: SetupPaths,
    dependencies: DependencySet,
    options: SetupOptions,
    runner: &'a dyn CommandRunner,
    elevated: bool,
}

impl<'a> SetupPipeline<'a> {
    /// Create a pipeline. `elevated` means the process runs as root.
    pub fn new(
        paths: SetupPaths,
        options: SetupOptions,
        runner: &'a dyn CommandRunner,
        elevated: bool,
    ) -> Self {
        Self {
            paths,
            dependencies: DependencySet::default(),
            options,
            runner,
            elevated,
        }
    }

    /// Replace the default dependency set.
    pub fn with_dependencies(mut self, dependencies: DependencySet) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Run the whole pipeline, then show the summary and offer a reboot.
    pub fn run(&self, ui: &mut dyn UserInterface) -> Result<SetupContext> {
        let mut ctx = SetupContext::default();

        self.probe_system(&mut ctx, ui)?;
        let resolution = self.resolve_dependencies(&mut ctx, ui)?;
        self.enable_interface(&mut ctx, ui);
        self.detect_sensors(&mut ctx, &resolution, ui);
        self.build_config(&mut ctx, &resolution, ui)?;
        self.delegate(&mut ctx, &resolution, ui)?;

        tracing::debug!("Setup finished: {:?}", ctx.outcome);
        print_summary(&ctx, ui);
        self.offer_reboot(&ctx, ui)?;

        Ok(ctx)
    }

    fn probe_system(&self, ctx: &mut SetupContext, ui: &mut dyn UserInterface) -> Result<()> {
        ui.step("Checking system");
        tracing::debug!("Reading OS identity from {}", self.paths.os_release.display());

        let os = SystemProbe::new(&self.paths.os_release).identify()?;
        if os.is_supported() {
            ui.success(&format!("Detected {}", os.pretty_name));
        } else {
            ui.warning(&format!(
                "{} ({}) is not a tested distribution (expected one of: {}); continuing",
                os.pretty_name,
                os.id,
                SUPPORTED_DISTRIBUTIONS.join(", ")
            ));
        }

        ctx.os = Some(os);
        Ok(())
    }

    fn resolve_dependencies(
        &self,
        ctx: &mut SetupContext,
        ui: &mut dyn UserInterface,
    ) -> Result<Resolution> {
        ui.step("Checking dependencies");

        let resolution = self.dependencies.resolve(&self.paths.search_path)?;
        verify_manifest(&self.paths.skill_dir)?;

        ui.success(&format!(
            "Using agent '{}' ({})",
            resolution.agent.kind,
            resolution.agent.path.display()
        ));
        for tool in &resolution.optional_missing {
            ui.warning(&format!("{} not found: {}", tool, optional_hint(tool)));
        }

        if self.options.no_packages {
            tracing::debug!("Skipping Python package install");
        } else {
            install_python_packages(
                SKILL_PYTHON_PACKAGES,
                resolution.has("pip3"),
                self.runner,
                ui,
            );
        }

        ctx.resolution = Some(resolution.clone());
        Ok(resolution)
    }

    fn enable_interface(&self, ctx: &mut SetupContext, ui: &mut dyn UserInterface) {
        ui.step("Enabling 1-Wire interface");
        if self.options.skip_interface {
            ui.message("Skipped (--skip-interface)");
            return;
        }

        let report = InterfaceEnabler::new(
            self.paths.boot_config.clone(),
            self.paths.modules_file.clone(),
            self.runner,
            self.elevated,
        )
        .enable(ui);

        ctx.outcome.reboot_required = report.reboot_required();
    }

    fn detect_sensors(
        &self,
        ctx: &mut SetupContext,
        resolution: &Resolution,
        ui: &mut dyn UserInterface,
    ) {
        ui.step("Detecting sensors");
        ctx.detection = SensorDetector::new(
            self.paths.w1_devices.clone(),
            self.paths.i2c_bus,
            self.runner,
        )
        .detect(resolution.has("i2cdetect"), ui);
    }

    fn build_config(
        &self,
        ctx: &mut SetupContext,
        resolution: &Resolution,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        ui.step("Configuring alerts");

        let config = ConfigBuilder::new(&ctx.detection.sensors).build(ui)?;
        let path = self
            .paths
            .skill_config(resolution.agent.kind.home_dir_name());

        write_config(&path, &config)?;
        ui.success(&format!("Configuration written to {}", path.display()));

        ctx.config = Some(config);
        ctx.config_path = Some(path);
        Ok(())
    }

    fn delegate(
        &self,
        ctx: &mut SetupContext,
        resolution: &Resolution,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        ui.step("Installing skill");
        let delegate = SkillDelegate::new(&resolution.agent, self.runner);

        delegate.install(&self.paths.skill_dir, ui)?;
        ui.success("Skill installed");

        if self.options.skip_tests {
            ui.message("Skipping smoke tests (--skip-tests)");
        } else {
            if ctx.detection.sensors.is_empty() {
                tracing::debug!("No sensor detected; skipping read test");
            } else {
                ctx.outcome.sensor_test = delegate.test_sensor(ui);
            }

            if ctx.has_notifications() {
                let send = ui
                    .prompt(&Prompt::confirm(
                        "test_notifications",
                        "Send a test notification now?",
                        true,
                    ))?
                    .as_bool()
                    .unwrap_or(false);
                if send {
                    ctx.outcome.notification_test = delegate.test_notifications(ui);
                }
            }
        }

        ctx.outcome.skill_enabled = delegate.enable(ui);
        if ctx.outcome.skill_enabled {
            ui.success("Skill enabled");
        }
        Ok(())
    }

    fn offer_reboot(&self, ctx: &SetupContext, ui: &mut dyn UserInterface) -> Result<()> {
        if !ctx.outcome.reboot_required {
            return Ok(());
        }

        let reboot = ui
            .prompt(&Prompt::confirm("reboot_now", "Reboot now?", false))?
            .as_bool()
            .unwrap_or(false);
        if !reboot {
            ui.message("Reboot later to activate the 1-Wire interface");
            return Ok(());
        }

        let mut command = CommandLine::new("reboot", Vec::<String>::new());
        if !self.elevated {
            command = command.elevated();
        }
        match self.runner.run(&command, &CommandOptions::default()) {
            Ok(result) if result.success => Ok(()),
            Ok(result) => {
                ui.warning(&format!("'{}' exited with {:?}", command, result.exit_code));
                Ok(())
            }
            Err(SetupError::CommandFailed { command, .. }) => {
                ui.warning(&format!("Could not run '{}'", command));
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
