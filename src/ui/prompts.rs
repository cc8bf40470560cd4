//! Interactive prompts.

use console::Term;
use dialoguer::{Confirm, Input, Password};

use crate::error::{SetupError, Result};

use super::{parse_bool_answer, Prompt, PromptResult, PromptType};

/// Convert dialoguer errors (EOF, interrupted input) to a prompt failure.
fn map_dialoguer_err(key: &str, e: dialoguer::Error) -> SetupError {
    SetupError::PromptUnavailable {
        key: key.to_string(),
        message: e.to_string(),
    }
}

/// Prompt the user for input.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    match &prompt.prompt_type {
        PromptType::Confirm => prompt_confirm(prompt, term),
        PromptType::Input => prompt_input(prompt, term),
        PromptType::Password => prompt_password(prompt, term),
    }
}

fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let default = prompt
        .default
        .as_deref()
        .map(parse_bool_answer)
        .unwrap_or(true);

    let result = Confirm::new()
        .with_prompt(&prompt.question)
        .default(default)
        .interact_on(term)
        .map_err(|e| map_dialoguer_err(&prompt.key, e))?;

    Ok(PromptResult::Bool(result))
}

fn prompt_input(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let input = Input::<String>::new()
        .with_prompt(&prompt.question)
        .allow_empty(true);

    let result: String = match prompt.default.as_deref() {
        Some(default) if !default.is_empty() => input
            .default(default.to_string())
            .interact_on(term)
            .map_err(|e| map_dialoguer_err(&prompt.key, e))?,
        _ => input
            .interact_on(term)
            .map_err(|e| map_dialoguer_err(&prompt.key, e))?,
    };

    Ok(PromptResult::String(result.trim().to_string()))
}

fn prompt_password(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let result = Password::new()
        .with_prompt(&prompt.question)
        .allow_empty_password(true)
        .interact_on(term)
        .map_err(|e| map_dialoguer_err(&prompt.key, e))?;

    Ok(PromptResult::String(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialoguer_errors_name_the_prompt() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err = map_dialoguer_err("high_threshold", dialoguer::Error::IO(io));
        assert!(matches!(err, SetupError::PromptUnavailable { ref key, .. } if key == "high_threshold"));
    }
}
