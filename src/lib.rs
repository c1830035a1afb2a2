//! Pomodoro countdown timer library.
//!
//! Implements the Pomodoro technique as a fixed 8-step session cycle:
//! four 25-minute work sessions alternating with 5-minute breaks,
//! closed by a 20-minute long break. The pieces:
//! - `sequence`: maps the repetition count to the next session
//! - `countdown`: cancellable one-second countdown state machine
//! - `daemon`: timer engine, tick loop, and Unix socket IPC
//! - `notify`: desktop notifications on session transitions
//! - `cli`: command parsing, IPC client, and output formatting

pub mod cli;
pub mod countdown;
pub mod daemon;
pub mod notify;
pub mod sequence;
pub mod types;

// Re-export commonly used types for convenience
pub use countdown::{format_remaining, Countdown, CountdownState, TickOutcome};
pub use daemon::{TimerEngine, TimerEvent};
pub use sequence::Sequencer;
pub use types::{IpcRequest, IpcResponse, ResponseData, Session, SessionKind};
