//! Countdown state machine with one-second granularity.
//!
//! The [`Countdown`] is a plain state machine driven by external tick
//! events; it does not schedule anything itself. The daemon's single
//! interval task is the only tick source, which keeps the "at most one
//! outstanding tick" invariant structural: ticks delivered while the
//! countdown is Idle or Completed are ignored, so a cancel can never
//! race a stale decrement.

use crate::types::Session;

// ============================================================================
// CountdownState
// ============================================================================

/// The state of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    /// No countdown active
    Idle,
    /// Counting down
    Running {
        /// Seconds left in the current session
        remaining_seconds: u32,
    },
    /// Reached zero; awaiting completion handling
    Completed,
}

/// Result of delivering one tick event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown was not running; the tick was dropped
    Ignored,
    /// One second elapsed
    Running {
        /// Seconds left after the decrement
        remaining_seconds: u32,
    },
    /// The countdown just reached zero
    Completed,
}

// ============================================================================
// Countdown
// ============================================================================

/// A cancellable one-second countdown for a single session.
#[derive(Debug, Clone)]
pub struct Countdown {
    state: CountdownState,
    session: Option<Session>,
}

impl Countdown {
    /// Creates an idle countdown.
    pub fn new() -> Self {
        Self {
            state: CountdownState::Idle,
            session: None,
        }
    }

    /// Starts counting down the given session.
    ///
    /// A zero-duration session completes immediately, without waiting
    /// for a tick.
    pub fn start(&mut self, session: Session) {
        self.session = Some(session);
        self.state = if session.duration_seconds == 0 {
            CountdownState::Completed
        } else {
            CountdownState::Running {
                remaining_seconds: session.duration_seconds,
            }
        };
    }

    /// Delivers one tick event.
    ///
    /// Only a Running countdown reacts; anything else reports
    /// [`TickOutcome::Ignored`].
    pub fn tick(&mut self) -> TickOutcome {
        match self.state {
            CountdownState::Running { remaining_seconds } => {
                let remaining = remaining_seconds - 1;
                if remaining == 0 {
                    self.state = CountdownState::Completed;
                    TickOutcome::Completed
                } else {
                    self.state = CountdownState::Running {
                        remaining_seconds: remaining,
                    };
                    TickOutcome::Running {
                        remaining_seconds: remaining,
                    }
                }
            }
            CountdownState::Idle | CountdownState::Completed => TickOutcome::Ignored,
        }
    }

    /// Cancels the countdown. Safe to call from any state, including
    /// before the first start.
    pub fn cancel(&mut self) {
        self.state = CountdownState::Idle;
        self.session = None;
    }

    /// Returns the current state.
    pub fn state(&self) -> CountdownState {
        self.state
    }

    /// Returns the session currently counting down, if any.
    pub fn session(&self) -> Option<Session> {
        self.session
    }

    /// Seconds left; zero when not running.
    pub fn remaining_seconds(&self) -> u32 {
        match self.state {
            CountdownState::Running { remaining_seconds } => remaining_seconds,
            _ => 0,
        }
    }

    /// Returns true while counting down.
    pub fn is_running(&self) -> bool {
        matches!(self.state, CountdownState::Running { .. })
    }

    /// Returns true once the countdown has reached zero.
    pub fn is_completed(&self) -> bool {
        self.state == CountdownState::Completed
    }

    /// Renders the remaining time for display.
    pub fn display(&self) -> String {
        format_remaining(self.remaining_seconds())
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Formats remaining seconds as minutes and zero-padded seconds,
/// e.g. `25:00` or `1:05`. Zero renders as the idle display `00:00`.
pub fn format_remaining(total_seconds: u32) -> String {
    if total_seconds == 0 {
        return "00:00".to_string();
    }
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

// ============================================================================
// Tests
// ============================================================================
