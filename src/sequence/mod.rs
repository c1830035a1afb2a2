//! Session sequencing for the Pomodoro cycle.
//!
//! The [`Sequencer`] maps a 1-based repetition count onto the fixed
//! 8-step session cycle and advances the count as sessions are started:
//! - counts 1, 3, 5, 7: work session
//! - counts 2, 4, 6: short break
//! - count 8: long break
//!
//! Past count 8 the cycle is exhausted and no further session is
//! produced until an explicit reset.

use crate::types::{Session, SessionKind, CYCLE_LENGTH, TALLY_MARK};

/// Maps a repetition count to the session kind scheduled at that
/// position, or `None` outside the 8-step cycle.
pub fn session_for(repetition: u32) -> Option<SessionKind> {
    match repetition {
        1 | 3 | 5 | 7 => Some(SessionKind::Work),
        2 | 4 | 6 => Some(SessionKind::ShortBreak),
        8 => Some(SessionKind::LongBreak),
        _ => None,
    }
}

// ============================================================================
// Sequencer
// ============================================================================

/// Tracks the position within the session cycle and hands out the next
/// session to run.
#[derive(Debug, Clone)]
pub struct Sequencer {
    /// 1-based index of the next session to run
    repetition_count: u32,
}

impl Sequencer {
    /// Creates a sequencer positioned at the first work session.
    pub fn new() -> Self {
        Self {
            repetition_count: 1,
        }
    }

    /// Returns the 1-based index of the next session to run.
    pub fn repetition_count(&self) -> u32 {
        self.repetition_count
    }

    /// Returns true once the long break has been started and the cycle
    /// has nothing further to schedule.
    pub fn is_exhausted(&self) -> bool {
        self.repetition_count > CYCLE_LENGTH
    }

    /// Produces the next session and advances the count by exactly 1.
    ///
    /// Returns `None` when the cycle is exhausted; the count is left
    /// untouched in that case so the stall is observable until a reset.
    pub fn advance(&mut self) -> Option<Session> {
        let kind = session_for(self.repetition_count)?;
        let session = Session {
            kind,
            repetition: self.repetition_count,
            duration_seconds: kind.duration_seconds(),
        };
        self.repetition_count += 1;
        Some(session)
    }

    /// Number of work sessions completed so far.
    ///
    /// Each work session is followed by a break, so two advances of the
    /// count correspond to one finished work session.
    pub fn completed_work_sessions(&self) -> u32 {
        (self.repetition_count - 1) / 2
    }

    /// Renders the tally, one mark per completed work session.
    pub fn tally(&self) -> String {
        TALLY_MARK.repeat(self.completed_work_sessions() as usize)
    }

    /// Rewinds the cycle to the first work session.
    pub fn reset(&mut self) {
        self.repetition_count = 1;
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
