//! Secret handling for display.
//!
//! Credentials entered in the wizard are written to the skill config in
//! cleartext (the file is owner-only). Anywhere they are echoed back to
//! the terminal or logs, [`OutputMasker`] replaces them.

pub mod mask;

pub use mask::OutputMasker;

use crate::config::AlertConfig;

/// A masker preloaded with every credential in `config`.
pub fn masker_for(config: &AlertConfig) -> OutputMasker {
    let mut masker = OutputMasker::new();
    masker.add_secrets(config.secret_values());
    masker
}
