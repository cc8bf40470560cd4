//! Masking of secret values in displayed text.

/// Replaces registered secret values with a fixed mask.
///
/// # Example
///
/// ```
/// use tempalert_setup::secrets::OutputMasker;
///
/// let mut masker = OutputMasker::new();
/// masker.add_secret("123456:ABC-token");
///
/// let output = masker.mask("bot_token: 123456:ABC-token");
/// assert_eq!(output, "bot_token: [REDACTED]");
/// ```
#[derive(Debug, Clone)]
pub struct OutputMasker {
    /// Longest first, so a secret containing another is masked whole.
    secrets: Vec<String>,
    mask: String,
}

impl OutputMasker {
    /// Create a masker using `[REDACTED]`.
    pub fn new() -> Self {
        Self::with_mask("[REDACTED]")
    }

    /// Create a masker with a custom mask string.
    pub fn with_mask(mask: impl Into<String>) -> Self {
        Self {
            secrets: Vec::new(),
            mask: mask.into(),
        }
    }

    /// Register a secret value to be masked.
    ///
    /// Empty strings and duplicates are ignored.
    pub fn add_secret(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() || self.secrets.contains(&value) {
            return;
        }
        self.secrets.push(value);
        self.secrets.sort_by(|a, b| b.len().cmp(&a.len()));
    }

    /// Register multiple secret values.
    pub fn add_secrets(&mut self, values: impl IntoIterator<Item = impl Into<String>>) {
        for value in values {
            self.add_secret(value);
        }
    }

    /// Mask any secret values in the given string.
    pub fn mask(&self, input: &str) -> String {
        self.secrets
            .iter()
            .fold(input.to_string(), |acc, secret| acc.replace(secret, &self.mask))
    }

    /// Get the number of registered secrets.
    pub fn secret_count(&self) -> usize {
        self.secrets.len()
    }
}

impl Default for OutputMasker {
    fn default() -> Self {
        Self::new()
    }
}
