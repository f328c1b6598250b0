//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! The binary takes an optional document to open at startup; everything
//! else happens inside the interactive shell.
//!
//! # Global Flags
//!
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output; implies `--no-interactive`
//! - `--no-interactive`: Disable confirmation prompts (destructive
//!   commands are refused instead of confirmed)

use clap::Parser;
use std::path::PathBuf;

/// spine - Interactive shell for editing document outline trees
#[derive(Parser, Debug)]
#[command(name = "spine")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Document to open at startup
    pub file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable interactive confirmation prompts
    #[arg(long)]
    pub no_interactive: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive confirmations are enabled.
    ///
    /// Interactive is the default; `--no-interactive` or `--quiet`
    /// disables it.
    pub fn interactive(&self) -> bool {
        !(self.no_interactive || self.quiet)
    }
}
