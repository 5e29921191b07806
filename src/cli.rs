//! Command-line interface definition using clap
//!
//! Provides structured argument parsing with automatic help generation.

use clap::{Parser, Subcommand};
use log_registry::Level;
use std::path::PathBuf;

// =============================================================================
// CLI Definition
// =============================================================================

/// Write to named log channels
#[derive(Parser, Debug)]
#[command(name = "logreg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Channel config file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Attach the call stack to every entry (overrides config)
    #[arg(long)]
    pub trace: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write one message to every matching channel
    Write {
        /// Severity (name or syslog number)
        #[arg(short, long, default_value = "notice")]
        level: Level,

        /// Message text (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// List configured channels in order
    Channels,

    /// List available engines
    Engines,

    /// Write a starter config file
    Init {
        /// Destination file
        #[arg(value_name = "FILE", default_value = "logreg.toml")]
        path: PathBuf,
    },
}

// =============================================================================
// Tests
// =============================================================================
