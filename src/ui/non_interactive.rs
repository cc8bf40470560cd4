//! Non-interactive UI for scripted and headless runs.

use std::collections::HashMap;

use crate::error::{SetupError, Result};

use super::{parse_bool_answer, OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Environment variable prefix for scripted prompt answers.
pub const PROMPT_ENV_PREFIX: &str = "TEMPALERT_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `TEMPALERT_PROMPT_<KEY>` environment variables,
/// falling back to each prompt's default.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn step(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n▶ {}", title);
        }
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        let answer = self
            .env_overrides
            .get(&env_key)
            .or(prompt.default.as_ref())
            .cloned();

        let Some(answer) = answer else {
            return Err(SetupError::PromptUnavailable {
                key: prompt.key.clone(),
                message: format!("no default value; set {} to answer it", env_key),
            });
        };

        if prompt.prompt_type == PromptType::Confirm {
            return Ok(PromptResult::Bool(parse_bool_answer(&answer)));
        }
        Ok(PromptResult::String(answer))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("  {}", message);
        }
        Box::new(NoopSpinner {
            show: self.mode.shows_status(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that just prints the final status line.
struct NoopSpinner {
    show: bool,
}

impl SpinnerHandle for NoopSpinner {
    fn finish_success(&mut self, msg: &str) {
        if self.show {
            println!("✓ {}", msg);
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn finish_skipped(&mut self, msg: &str) {
        if self.show {
            println!("○ {}", msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ui_with(pairs: &[(&str, &str)]) -> NonInteractiveUI {
        let overrides = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        NonInteractiveUI::with_overrides(OutputMode::Silent, overrides)
    }

    #[test]
    fn uses_default_without_override() {
        let mut ui = ui_with(&[]);
        let result = ui
            .prompt(&Prompt::input("high_threshold", "High", Some("35.0")))
            .unwrap();
        assert_eq!(result.as_string(), "35.0");
    }

    #[test]
    fn env_override_wins_over_default() {
        let mut ui = ui_with(&[("TEMPALERT_PROMPT_HIGH_THRESHOLD", "40")]);
        let result = ui
            .prompt(&Prompt::input("high_threshold", "High", Some("35.0")))
            .unwrap();
        assert_eq!(result.as_string(), "40");
    }

    #[test]
    fn confirm_override_is_parsed_as_bool() {
        let mut ui = ui_with(&[("TEMPALERT_PROMPT_ENABLE_EMAIL", "yes")]);
        let result = ui
            .prompt(&Prompt::confirm("enable_email", "Email?", false))
            .unwrap();
        assert_eq!(result.as_bool(), Some(true));
    }

    #[test]
    fn missing_default_is_an_error_naming_the_variable() {
        let mut ui = ui_with(&[]);
        let err = ui
            .prompt(&Prompt::input("chat_id", "Chat id", None))
            .unwrap_err();
        assert!(err.to_string().contains("TEMPALERT_PROMPT_CHAT_ID"));
    }

    #[test]
    fn is_never_interactive() {
        assert!(!ui_with(&[]).is_interactive());
    }
}
