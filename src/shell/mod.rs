//! shell
//!
//! The interactive command loop.
//!
//! # Responsibilities
//!
//! - Read lines, tokenize them shell-style (quotes group words), and
//!   dispatch to the command handlers in [`commands`]
//! - Render a prompt showing the open file (truncated) and a `*` marker
//!   when there are unsaved changes
//! - Report errors and keep going; only `quit`/`exit` or end of input end
//!   the loop
//!
//! The shell owns at most one [`Session`] at a time. Everything it does to
//! the outline goes through the session's public operations.

pub mod commands;

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::session::Session;
use crate::ui::output::{self, Verbosity};
use crate::ui::render;

/// What the loop should do after a command.
#[derive(Debug)]
pub enum Flow {
    /// Keep reading commands.
    Continue,
    /// Leave the shell.
    Exit,
}

/// The interactive shell state.
pub struct Shell {
    pub(crate) session: Option<Session>,
    pub(crate) verbosity: Verbosity,
    pub(crate) interactive: bool,
}

impl Shell {
    /// Create a shell with no document open.
    pub fn new(verbosity: Verbosity, interactive: bool) -> Self {
        Self {
            session: None,
            verbosity,
            interactive,
        }
    }

    /// Run the command loop over stdin until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        output::print("spine - outline shell. Type 'help' for commands.", self.verbosity);

        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        loop {
            self.show_prompt()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break; // end of input
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let Some(tokens) = shlex::split(line) else {
                output::error("parse error: unmatched quote");
                continue;
            };
            if tokens.is_empty() {
                continue;
            }

            match commands::dispatch(self, &mut input, &tokens) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) => output::error(e),
            }
        }
        Ok(())
    }

    fn show_prompt(&self) -> Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return Ok(());
        }
        let label = render::short_label(
            self.session.as_ref().map(Session::path),
            render::LABEL_WIDTH,
        );
        let dirty = if self.session.as_ref().is_some_and(Session::dirty) {
            "*"
        } else {
            ""
        };
        print!("[{label}{dirty}]: ");
        std::io::stdout().flush()?;
        Ok(())
    }
}
