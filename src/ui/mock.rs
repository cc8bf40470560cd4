//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use tempalert_setup::ui::{MockUI, Prompt, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("high_threshold", "40");
//!
//! let answer = ui.prompt(&Prompt::input("high_threshold", "High", Some("35.0"))).unwrap();
//! assert_eq!(answer.as_string(), "40");
//!
//! ui.success("Done!");
//! assert!(ui.has_success("Done"));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;

use super::{parse_bool_answer, OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
///
/// Captures all UI interactions, including how each spinner finished, and
/// answers prompts from pre-configured responses.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    steps: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<String>,
    spinner_outcomes: Rc<RefCell<Vec<(String, SpinnerStatus)>>>,
    prompt_responses: HashMap<String, String>,
    prompts_shown: Vec<String>,
    /// Fallback response for any prompt key not explicitly configured.
    default_prompt_response: Option<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Create a MockUI reporting the given output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Set a default response for any prompt key not explicitly configured.
    ///
    /// An empty string here simulates a user pressing enter everywhere.
    pub fn set_default_prompt_response(&mut self, response: &str) {
        self.default_prompt_response = Some(response.to_string());
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all announced stages.
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get each finished spinner's message and status, in finish order.
    pub fn spinner_outcomes(&self) -> Vec<(String, SpinnerStatus)> {
        self.spinner_outcomes.borrow().clone()
    }

    /// Get all headers shown.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a prompt with this key was shown.
    pub fn was_prompted(&self, key: &str) -> bool {
        self.prompts_shown.iter().any(|k| k == key)
    }

    fn next_response(&self, key: &str) -> Option<String> {
        self.prompt_responses
            .get(key)
            .cloned()
            .or_else(|| self.default_prompt_response.clone())
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn step(&mut self, title: &str) {
        self.steps.push(title.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        // An empty response behaves like pressing enter: the default applies.
        let response = self
            .next_response(&prompt.key)
            .filter(|r| !r.is_empty())
            .or_else(|| prompt.default.clone())
            .unwrap_or_default();

        if prompt.prompt_type == PromptType::Confirm {
            return Ok(PromptResult::Bool(parse_bool_answer(&response)));
        }
        Ok(PromptResult::String(response))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            outcomes: Rc::clone(&self.spinner_outcomes),
        })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    /// Finished successfully.
    Success,
    /// Finished with error.
    Error,
    /// Finished as skipped.
    Skipped,
}

/// Spinner that reports its finish back to the owning `MockUI`.
struct MockSpinner {
    outcomes: Rc<RefCell<Vec<(String, SpinnerStatus)>>>,
}

impl MockSpinner {
    fn record(&self, msg: &str, status: SpinnerStatus) {
        self.outcomes.borrow_mut().push((msg.to_string(), status));
    }
}

impl SpinnerHandle for MockSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.record(msg, SpinnerStatus::Success);
    }

    fn finish_error(&mut self, msg: &str) {
        self.record(msg, SpinnerStatus::Error);
    }

    fn finish_skipped(&mut self, msg: &str) {
        self.record(msg, SpinnerStatus::Skipped);
    }
}
