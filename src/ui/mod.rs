//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - `scripted` - Prompter replaying canned answers, for tests
//! - This module - The [Prompter] seam and its terminal implementation

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::error::{GitWorkflowError, Result};

pub mod formatter;
pub mod scripted;

// Re-export formatter functions for convenience
pub use formatter::{
    display_command, display_done, display_error, display_failure, display_list, display_output,
    display_status, display_success, display_warning, prompt_prefix, separator_label,
};
pub use scripted::{Answer, ScriptedPrompter};

/// Interactive questions the workflow asks. Every call blocks until answered.
pub trait Prompter {
    /// Single choice among `items`; returns the chosen index
    fn select(&self, message: &str, items: &[String]) -> Result<usize>;

    /// Yes/no question
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;

    /// Free text; may be empty
    fn input(&self, message: &str) -> Result<String>;
}

/// Prompter on the controlling terminal
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self::default()
    }
}

fn prompt_error(e: dialoguer::Error) -> GitWorkflowError {
    GitWorkflowError::prompt(e.to_string())
}

impl Prompter for TerminalPrompter {
    fn select(&self, message: &str, items: &[String]) -> Result<usize> {
        Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(items)
            .default(0)
            .max_length(20)
            .interact()
            .map_err(prompt_error)
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn input(&self, message: &str) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()
            .map(|answer| answer.trim().to_string())
            .map_err(prompt_error)
    }
}
