//! Command definitions for the Pomodoro timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro countdown timer with a fixed work/break cycle
#[derive(Parser, Debug)]
#[command(
    name = "tomato",
    version,
    about = "Pomodoro countdown timer",
    long_about = "A countdown timer for the Pomodoro technique: 25-minute work \
                  sessions alternating with 5-minute breaks, closed by a \
                  20-minute long break after the fourth work session.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Socket path for daemon communication (defaults to ~/.tomato/tomato.sock)
    #[arg(long, global = true, value_name = "PATH")]
    pub socket: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the next session in the work/break cycle
    Start,

    /// Cancel the countdown and rewind the cycle to the first work session
    Reset,

    /// Show the running countdown and the completed-session tally
    Status,

    /// Run the timer daemon in the foreground
    Daemon,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Tests
// ============================================================================
