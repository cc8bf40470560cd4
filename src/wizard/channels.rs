//! Notification channel prompts.
//!
//! A channel is only returned when every required field was answered;
//! otherwise the user is warned and the channel is left out of the
//! configuration.

use crate::config::{EmailChannel, TelegramChannel, DEFAULT_SMTP_PORT, DEFAULT_SMTP_SERVER};
use crate::error::Result;
use crate::ui::{Prompt, UserInterface};

fn ask(ui: &mut dyn UserInterface, key: &str, question: &str, default: &str) -> Result<String> {
    let answer = ui.prompt(&Prompt::input(key, question, Some(default)))?;
    let answer = answer.as_string().trim().to_string();
    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer
    })
}

fn ask_secret(ui: &mut dyn UserInterface, key: &str, question: &str) -> Result<String> {
    Ok(ui.prompt(&Prompt::password(key, question))?.as_string())
}

fn confirm(ui: &mut dyn UserInterface, key: &str, question: &str, default: bool) -> Result<bool> {
    let answer = ui.prompt(&Prompt::confirm(key, question, default))?;
    Ok(answer.as_bool().unwrap_or(default))
}

/// Ask whether to enable email alerts and collect SMTP settings.
pub fn prompt_email(ui: &mut dyn UserInterface) -> Result<Option<EmailChannel>> {
    if !confirm(ui, "enable_email", "Enable email notifications?", false)? {
        return Ok(None);
    }

    let smtp_server = ask(ui, "smtp_server", "SMTP server", DEFAULT_SMTP_SERVER)?;
    let port_answer = ask(ui, "smtp_port", "SMTP port", &DEFAULT_SMTP_PORT.to_string())?;
    let smtp_port = match port_answer.parse::<u16>() {
        Ok(port) if port > 0 => port,
        _ => {
            ui.warning(&format!(
                "Invalid SMTP port '{}', using {}",
                port_answer, DEFAULT_SMTP_PORT
            ));
            DEFAULT_SMTP_PORT
        }
    };
    let username = ask(ui, "email_username", "Email username", "")?;
    let password = ask_secret(ui, "email_password", "Email password (app password)")?;
    let from_email = ask(ui, "from_email", "From address", &username)?;
    let to_email = ask(ui, "to_email", "Send alerts to", &username)?;

    let missing: Vec<&str> = [
        ("smtp_server", &smtp_server),
        ("username", &username),
        ("from_email", &from_email),
        ("to_email", &to_email),
    ]
    .iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(name, _)| *name)
    .collect();

    if !missing.is_empty() {
        ui.warning(&format!(
            "Email notifications disabled: {} left empty",
            missing.join(", ")
        ));
        return Ok(None);
    }

    Ok(Some(EmailChannel {
        enabled: true,
        smtp_server,
        smtp_port,
        username,
        password,
        from_email,
        to_email,
    }))
}

/// Ask whether to enable Telegram alerts and collect bot settings.
pub fn prompt_telegram(ui: &mut dyn UserInterface) -> Result<Option<TelegramChannel>> {
    if !confirm(ui, "enable_telegram", "Enable Telegram notifications?", true)? {
        return Ok(None);
    }

    let bot_token = ask_secret(ui, "telegram_bot_token", "Telegram bot token")?
        .trim()
        .to_string();
    let chat_id = ask(ui, "telegram_chat_id", "Telegram chat id", "")?;

    if bot_token.is_empty() || chat_id.is_empty() {
        let field = if bot_token.is_empty() { "bot_token" } else { "chat_id" };
        ui.warning(&format!("Telegram notifications disabled: {} left empty", field));
        return Ok(None);
    }

    Ok(Some(TelegramChannel {
        enabled: true,
        bot_token,
        chat_id,
    }))
}
