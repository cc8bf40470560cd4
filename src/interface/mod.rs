//! 1-Wire interface enablement.
//!
//! Two independent checks:
//! - the boot configuration must declare the `w1-gpio` overlay; a missing
//!   directive is appended (never rewritten) and a reboot becomes necessary
//! - the `w1-gpio`/`w1-therm` modules must be loaded; missing ones are
//!   loaded live with `modprobe`
//!
//! Nothing here is fatal. Failures surface as warnings because the sensor
//! stage and the skill tolerate an interface that only activates after reboot.

pub mod boot;
pub mod modules;

use std::path::PathBuf;

use crate::shell::CommandRunner;
use crate::ui::UserInterface;

pub use boot::{ensure_directive, DirectiveStatus, W1_DIRECTIVE};
pub use modules::{ensure_modules, loaded_modules, ModuleStatus, W1_MODULES};

/// Result of [`InterfaceEnabler::enable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceReport {
    pub directive: DirectiveStatus,
    pub modules: Vec<ModuleStatus>,
}

impl InterfaceReport {
    /// A reboot is needed once the directive was newly appended.
    pub fn reboot_required(&self) -> bool {
        self.directive == DirectiveStatus::Appended
    }

    /// True when every check ended in a working state.
    pub fn is_active(&self) -> bool {
        !matches!(self.directive, DirectiveStatus::Failed(_))
            && self
                .modules
                .iter()
                .all(|m| !matches!(m, ModuleStatus::Failed { .. }))
    }
}

/// Ensures the 1-Wire interface is declared and its modules are loaded.
pub struct InterfaceEnabler<'a> {
    boot_config: PathBuf,
    modules_file: PathBuf,
    runner: &'a dyn CommandRunner,
    elevated: bool,
}

impl<'a> InterfaceEnabler<'a> {
    /// Create an enabler. `elevated` means the process already runs as root,
    /// so privileged steps run without `sudo`.
    pub fn new(
        boot_config: PathBuf,
        modules_file: PathBuf,
        runner: &'a dyn CommandRunner,
        elevated: bool,
    ) -> Self {
        Self {
            boot_config,
            modules_file,
            runner,
            elevated,
        }
    }

    /// Run both checks, reporting progress through `ui`.
    pub fn enable(&self, ui: &mut dyn UserInterface) -> InterfaceReport {
        let directive = ensure_directive(&self.boot_config, self.runner, self.elevated);
        match &directive {
            DirectiveStatus::AlreadyPresent => ui.success(&format!(
                "1-Wire interface already enabled in {}",
                self.boot_config.display()
            )),
            DirectiveStatus::Appended => {
                ui.success(&format!(
                    "Added '{}' to {}",
                    W1_DIRECTIVE,
                    self.boot_config.display()
                ));
                ui.warning("A reboot is required before the 1-Wire bus becomes active");
            }
            DirectiveStatus::Failed(reason) => ui.warning(&format!(
                "Could not enable 1-Wire in {}: {}",
                self.boot_config.display(),
                reason
            )),
        }

        let modules = ensure_modules(&self.modules_file, self.runner, self.elevated);
        for status in &modules {
            match status {
                ModuleStatus::AlreadyLoaded(name) => {
                    ui.success(&format!("Kernel module {} already loaded", name))
                }
                ModuleStatus::Loaded(name) => ui.success(&format!("Loaded kernel module {}", name)),
                ModuleStatus::Failed { name, reason } => {
                    ui.warning(&format!("Could not load kernel module {}: {}", name, reason))
                }
            }
        }

        InterfaceReport {
            directive,
            modules,
        }
    }
}
