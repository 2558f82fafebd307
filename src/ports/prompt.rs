//! Prompt Port
//!
//! Line-based operator interaction used by wallet selection, the balance
//! gate and interactive configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Failed to read operator input: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input closed")]
    Closed,
}

pub trait Prompt: Send + Sync {
    /// Show `question` and return the operator's answer, trimmed
    fn ask(&self, question: &str) -> Result<String, PromptError>;

    /// Show an informational line
    fn say(&self, line: &str);

    /// Overwrite the current line in place (countdowns)
    fn progress(&self, line: &str);
}
