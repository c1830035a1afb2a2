//! Desktop notifications for session transitions.
//!
//! The daemon has no window of its own, so session changes are
//! announced through the desktop notification service. Delivery
//! failures are logged and otherwise ignored; the timer keeps running
//! without a notification daemon present.

use notify_rust::Notification;
use tokio::sync::mpsc;

use crate::countdown::format_remaining;
use crate::daemon::TimerEvent;
use crate::types::SessionKind;

/// Notification summary line.
const SUMMARY: &str = "Pomodoro";

/// Consumes timer events and raises a notification for the ones a user
/// away from the terminal cares about.
pub async fn run(mut event_rx: mpsc::UnboundedReceiver<TimerEvent>) {
    while let Some(event) = event_rx.recv().await {
        if let Some(body) = message_for(&event) {
            send(&body);
        }
    }
}

/// Maps a timer event to a notification body, or `None` for events
/// that stay quiet (ticks, resets).
fn message_for(event: &TimerEvent) -> Option<String> {
    match event {
        TimerEvent::SessionStarted {
            kind,
            duration_seconds,
            ..
        } => {
            let what = match kind {
                SessionKind::Work => "Work session",
                SessionKind::ShortBreak => "Short break",
                SessionKind::LongBreak => "Long break",
            };
            Some(format!(
                "{} started ({})",
                what,
                format_remaining(*duration_seconds)
            ))
        }
        TimerEvent::CycleFinished { tally } => {
            Some(format!(
                "Cycle complete: {} work sessions {}",
                tally.chars().count(),
                tally
            ))
        }
        _ => None,
    }
}

fn send(body: &str) {
    let result = Notification::new()
        .summary(SUMMARY)
        .body(body)
        .show();

    if let Err(e) = result {
        tracing::warn!("Notification failed: {e}");
    }
}

// ============================================================================
// Tests
// ============================================================================
