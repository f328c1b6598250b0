//! ui::prompts
//!
//! Interactive prompts and confirmations.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode,
//! destructive operations requiring confirmation fail with a clear error
//! rather than defaulting to yes.
//!
//! Confirmation is deliberately literal: the user must type `YES` (all
//! caps) for destructive operations like `remove --all` or discarding
//! unsaved changes.

use std::io::{BufRead, Write};

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

/// Prompt for a literal `YES` confirmation of a destructive action.
///
/// Returns `Ok(true)` only when the user types exactly `YES`. End of
/// input counts as cancellation.
///
/// # Errors
///
/// Returns `PromptError::NotInteractive` when prompts are disabled.
pub fn confirm_destructive(
    message: &str,
    interactive: bool,
    input: &mut dyn BufRead,
) -> Result<bool, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }
    println!("  {message} Type YES to confirm:");
    print!("  > ");
    std::io::stdout()
        .flush()
        .map_err(|e| PromptError::IoError(e.to_string()))?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| PromptError::IoError(e.to_string()))?;
    if read == 0 {
        return Err(PromptError::Cancelled);
    }
    Ok(line.trim() == "YES")
}
