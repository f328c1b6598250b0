//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Open the startup document, if one was given (failure to open is
//!   reported but does not abort the shell)
//! - Hand control to the interactive [`crate::shell`]
//!
//! The CLI layer is thin: it never touches the outline tree directly. All
//! edits flow through the shell's command handlers into the session.

pub mod args;

pub use args::Cli;

use anyhow::Result;

use crate::shell::{commands, Shell};
use crate::ui::output::{self, Verbosity};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    let mut shell = Shell::new(verbosity, cli.interactive());

    if let Some(file) = &cli.file {
        let arg = vec![file.display().to_string()];
        if let Err(e) = commands::open(&mut shell, &arg) {
            output::error(e);
        }
    }

    shell.run()
}
