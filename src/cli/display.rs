//! Output formatting for the Pomodoro timer CLI.

use crate::countdown::format_remaining;
use crate::types::IpcResponse;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows a success message for a started session.
    pub fn show_start_success(response: &IpcResponse) {
        if let Some(data) = &response.data {
            let label = Self::state_label(data.state.as_deref().unwrap_or("unknown"));
            println!("* {} started", label);

            if let Some(remaining) = data.remaining_seconds {
                println!("  Remaining: {}", format_remaining(remaining));
            }
            if let Some(tally) = &data.tally {
                if !tally.is_empty() {
                    println!("  Completed: {}", tally);
                }
            }
        } else {
            println!("* {}", response.message);
        }
    }

    /// Shows a success message for a reset.
    pub fn show_reset_success(_response: &IpcResponse) {
        println!("[] Timer reset");
        println!("  Remaining: 00:00");
    }

    /// Shows the current timer status.
    pub fn show_status(response: &IpcResponse) {
        println!("Pomodoro timer status");
        println!("─────────────────────");

        if let Some(data) = &response.data {
            let state = data.state.as_deref().unwrap_or("unknown");
            println!("State: {}", Self::state_label(state));

            if let Some(remaining) = data.remaining_seconds {
                println!("Remaining: {}", format_remaining(remaining));
            }
            if state != "idle" {
                if let Some(rep) = data.repetition_count {
                    // repetition_count points at the next session; the
                    // running one is the previous position.
                    println!("Session: #{} of 8", rep.saturating_sub(1));
                }
            }
            if let Some(tally) = &data.tally {
                if !tally.is_empty() {
                    println!("Completed: {}", tally);
                }
            }
        } else {
            println!("The timer daemon is not running");
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    /// Maps a wire state to its indicator label.
    fn state_label(state: &str) -> &str {
        match state {
            "work" => "Work",
            "short_break" => "Break",
            "long_break" => "Long break",
            "idle" => "Idle",
            other => other,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
