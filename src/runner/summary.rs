//! End-of-run summary.

use crate::agent::TestStatus;
use crate::secrets::masker_for;
use crate::ui::{OutputMode, UserInterface};

use super::context::SetupContext;

/// Print what was configured and what still needs doing.
///
/// In verbose mode the written document is echoed with credentials masked.
pub fn print_summary(ctx: &SetupContext, ui: &mut dyn UserInterface) {
    ui.show_header("Setup complete");

    if let Some(path) = &ctx.config_path {
        ui.message(&format!("Config:        {}", path.display()));
    }

    if let Some(config) = &ctx.config {
        let settings = &config.config;
        ui.message(&format!(
            "Sensor:        {} ({})",
            settings.sensor_id, settings.sensor_type
        ));
        ui.message(&format!(
            "Thresholds:    {:.1}°C high, {:.1}°C low",
            settings.high_threshold, settings.low_threshold
        ));

        let channels = config.notifications.enabled_channels();
        ui.message(&format!(
            "Notifications: {}",
            if channels.is_empty() {
                "none".to_string()
            } else {
                channels.join(", ")
            }
        ));

        if ui.output_mode() == OutputMode::Verbose {
            if let Ok(yaml) = serde_yaml::to_string(config) {
                let masked = masker_for(config).mask(&yaml);
                for line in masked.lines() {
                    ui.message(&format!("  {}", line));
                }
            }
        }
    }

    report_test(ui, "Sensor test", ctx.outcome.sensor_test);
    report_test(ui, "Notification test", ctx.outcome.notification_test);

    if ctx.outcome.reboot_required {
        ui.warning("Reboot required to activate the 1-Wire interface");
    }
    if ctx.outcome.skill_enabled {
        ui.message("Check the skill any time with: tempalert-setup status");
    }
}

fn report_test(ui: &mut dyn UserInterface, label: &str, status: TestStatus) {
    match status {
        TestStatus::Passed => ui.success(&format!("{}: passed", label)),
        TestStatus::Failed => ui.warning(&format!("{}: failed", label)),
        TestStatus::NotRun => ui.message(&format!("{}: not run", label)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AlertConfig, TelegramChannel};
    use crate::ui::MockUI;

    fn context() -> SetupContext {
        let mut config = AlertConfig::with_defaults();
        config.notifications.telegram = Some(TelegramChannel {
            enabled: true,
            bot_token: "bot-SECRET-token".into(),
            chat_id: "42".into(),
        });
        SetupContext {
            config: Some(config),
            ..Default::default()
        }
    }

    #[test]
    fn verbose_summary_masks_credentials() {
        let mut ui = MockUI::with_mode(OutputMode::Verbose);
        print_summary(&context(), &mut ui);

        assert!(ui.has_message("[REDACTED]"));
        assert!(!ui.messages().iter().any(|m| m.contains("bot-SECRET-token")));
    }

    #[test]
    fn normal_summary_lists_channels_only() {
        let mut ui = MockUI::new();
        print_summary(&context(), &mut ui);

        assert!(ui.has_message("Notifications: telegram"));
        assert!(!ui.has_message("bot_token"));
        assert!(ui.has_message("Sensor test: not run"));
    }
}
