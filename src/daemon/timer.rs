//! Timer engine for the Pomodoro daemon.
//!
//! Owns the [`Sequencer`] and the [`Countdown`] and wires them
//! together: a started session counts down one second per tick, and on
//! reaching zero the engine advances the sequencer itself so the cycle
//! runs unattended until the long break finishes or a reset arrives.

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use crate::countdown::{Countdown, TickOutcome};
use crate::sequence::Sequencer;
use crate::types::{ResponseData, Session, SessionKind};

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events emitted for notifications and external observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// A session began counting down
    SessionStarted {
        /// Kind of the session
        kind: SessionKind,
        /// 1-based position within the cycle
        repetition: u32,
        /// Session length in seconds
        duration_seconds: u32,
    },
    /// One second elapsed
    Tick {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// A session ran to zero
    SessionCompleted {
        /// Kind of the finished session
        kind: SessionKind,
        /// Work sessions completed so far
        completed_work_sessions: u32,
        /// Rendered tally marks
        tally: String,
    },
    /// The long break finished; the cycle is exhausted until a reset
    CycleFinished {
        /// Final tally for the cycle
        tally: String,
    },
    /// The timer was reset to its initial state
    Reset,
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that manages the session cycle and countdown.
pub struct TimerEngine {
    sequencer: Sequencer,
    countdown: Countdown,
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates a new engine with the given event channel.
    pub fn new(event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            sequencer: Sequencer::new(),
            countdown: Countdown::new(),
            event_tx,
        }
    }

    /// Starts the next session in the cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if a session is already counting down, or if
    /// the cycle is exhausted and needs a reset first.
    pub fn start(&mut self) -> Result<()> {
        if self.countdown.is_running() {
            anyhow::bail!("A session is already running");
        }

        match self.sequencer.advance() {
            Some(session) => self.begin(session),
            None => anyhow::bail!("The session cycle is finished; reset the timer to start over"),
        }
    }

    /// Resets the timer: cancels the countdown, rewinds the cycle, and
    /// clears the tally. Idempotent, and safe before the first start.
    pub fn reset(&mut self) -> Result<()> {
        self.countdown.cancel();
        self.sequencer.reset();

        self.event_tx
            .send(TimerEvent::Reset)
            .context("Failed to send reset event")?;

        Ok(())
    }

    /// Delivers one one-second tick to the countdown.
    ///
    /// Ticks arriving while nothing is running are dropped.
    pub fn on_tick(&mut self) -> Result<()> {
        match self.countdown.tick() {
            TickOutcome::Ignored => Ok(()),
            TickOutcome::Running { remaining_seconds } => self
                .event_tx
                .send(TimerEvent::Tick { remaining_seconds })
                .context("Failed to send tick event"),
            TickOutcome::Completed => self.on_session_complete(),
        }
    }

    /// Starts counting down a session and announces it.
    fn begin(&mut self, session: Session) -> Result<()> {
        self.countdown.start(session);

        self.event_tx
            .send(TimerEvent::SessionStarted {
                kind: session.kind,
                repetition: session.repetition,
                duration_seconds: session.duration_seconds,
            })
            .context("Failed to send session started event")?;

        // Zero-length sessions complete without waiting for a tick.
        if self.countdown.is_completed() {
            self.on_session_complete()?;
        }

        Ok(())
    }

    /// Handles a countdown reaching zero: advance the cycle, recompute
    /// the tally, and either continue automatically or stall.
    fn on_session_complete(&mut self) -> Result<()> {
        let finished = self
            .countdown
            .session()
            .map(|s| s.kind)
            .unwrap_or(SessionKind::Work);

        // Advance first; the tally is derived from the count after the
        // next session has been claimed.
        let next = self.sequencer.advance();

        self.event_tx
            .send(TimerEvent::SessionCompleted {
                kind: finished,
                completed_work_sessions: self.sequencer.completed_work_sessions(),
                tally: self.sequencer.tally(),
            })
            .context("Failed to send session completed event")?;

        match next {
            Some(session) => self.begin(session),
            None => {
                self.countdown.cancel();
                self.event_tx
                    .send(TimerEvent::CycleFinished {
                        tally: self.sequencer.tally(),
                    })
                    .context("Failed to send cycle finished event")
            }
        }
    }

    /// Returns the kind of the session currently counting down.
    pub fn current_kind(&self) -> Option<SessionKind> {
        if self.countdown.is_running() {
            self.countdown.session().map(|s| s.kind)
        } else {
            None
        }
    }

    /// Returns a status snapshot for IPC responses.
    pub fn snapshot(&self) -> ResponseData {
        let state = self
            .current_kind()
            .map(|k| k.as_str().to_string())
            .unwrap_or_else(|| "idle".to_string());

        ResponseData {
            state: Some(state),
            remaining_seconds: Some(self.countdown.remaining_seconds()),
            repetition_count: Some(self.sequencer.repetition_count()),
            completed_work_sessions: Some(self.sequencer.completed_work_sessions()),
            tally: Some(self.sequencer.tally()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
