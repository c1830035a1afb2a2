//! Core data types for the Pomodoro countdown timer.
//!
//! This module defines:
//! - Session kinds and their fixed durations
//! - The session cycle constants
//! - IPC request/response serialization

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Work session length in minutes.
pub const WORK_MINUTES: u32 = 25;

/// Short break length in minutes.
pub const SHORT_BREAK_MINUTES: u32 = 5;

/// Long break length in minutes.
pub const LONG_BREAK_MINUTES: u32 = 20;

/// Number of sessions in one full cycle (4 work sessions interleaved
/// with 3 short breaks, closed by a long break).
pub const CYCLE_LENGTH: u32 = 8;

/// Glyph used for one completed work session in the tally.
pub const TALLY_MARK: &str = "✔";

// ============================================================================
// SessionKind
// ============================================================================

/// The kind of a single timed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    /// Focused work session
    Work,
    /// Short break between work sessions
    ShortBreak,
    /// Long break closing a full cycle
    LongBreak,
}

impl SessionKind {
    /// Returns the wire/string representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Work => "work",
            SessionKind::ShortBreak => "short_break",
            SessionKind::LongBreak => "long_break",
        }
    }

    /// Returns the human-facing indicator label.
    ///
    /// Both break kinds share the "Break" label; they differ only in
    /// duration.
    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Work => "Work",
            SessionKind::ShortBreak | SessionKind::LongBreak => "Break",
        }
    }

    /// Returns the fixed duration of this session kind in seconds.
    pub fn duration_seconds(&self) -> u32 {
        match self {
            SessionKind::Work => WORK_MINUTES * 60,
            SessionKind::ShortBreak => SHORT_BREAK_MINUTES * 60,
            SessionKind::LongBreak => LONG_BREAK_MINUTES * 60,
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// A single scheduled session: its kind, its position in the cycle, and
/// how long it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    /// What kind of session this is
    pub kind: SessionKind,
    /// 1-based position within the 8-step cycle
    pub repetition: u32,
    /// Duration in seconds
    pub duration_seconds: u32,
}

// ============================================================================
// IPC Types
// ============================================================================

/// IPC request from client to daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum IpcRequest {
    /// Start the next session in the cycle
    Start,
    /// Cancel the countdown and rewind the cycle
    Reset,
    /// Query the current timer state
    Status,
}

/// Response data for IPC responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseData {
    /// Current state: "idle" or a session kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Remaining seconds in the running session
    #[serde(rename = "remainingSeconds", skip_serializing_if = "Option::is_none")]
    pub remaining_seconds: Option<u32>,
    /// 1-based index of the next session to run
    #[serde(rename = "repetitionCount", skip_serializing_if = "Option::is_none")]
    pub repetition_count: Option<u32>,
    /// Number of completed work sessions
    #[serde(
        rename = "completedWorkSessions",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_work_sessions: Option<u32>,
    /// Tally string, one mark per completed work session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tally: Option<String>,
}

/// IPC response from daemon to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcResponse {
    /// Response status ("success" or "error")
    pub status: String,
    /// Human-readable message
    pub message: String,
    /// Optional response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl IpcResponse {
    /// Creates a success response.
    pub fn success(message: impl Into<String>, data: Option<ResponseData>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data,
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            data: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod session_kind_tests {
        use super::*;

        #[test]
        fn test_as_str() {
            assert_eq!(SessionKind::Work.as_str(), "work");
            assert_eq!(SessionKind::ShortBreak.as_str(), "short_break");
            assert_eq!(SessionKind::LongBreak.as_str(), "long_break");
        }

        #[test]
        fn test_label() {
            assert_eq!(SessionKind::Work.label(), "Work");
            assert_eq!(SessionKind::ShortBreak.label(), "Break");
            assert_eq!(SessionKind::LongBreak.label(), "Break");
        }

        #[test]
        fn test_duration_seconds() {
            assert_eq!(SessionKind::Work.duration_seconds(), 25 * 60);
            assert_eq!(SessionKind::ShortBreak.duration_seconds(), 5 * 60);
            assert_eq!(SessionKind::LongBreak.duration_seconds(), 20 * 60);
        }

        #[test]
        fn test_serialize_deserialize() {
            let kind = SessionKind::ShortBreak;
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, "\"short_break\"");

            let deserialized: SessionKind = serde_json::from_str(&json).unwrap();
            assert_eq!(deserialized, SessionKind::ShortBreak);
        }
    }

    mod ipc_tests {
        use super::*;

        #[test]
        fn test_request_serialize() {
            let json = serde_json::to_string(&IpcRequest::Start).unwrap();
            assert_eq!(json, r#"{"command":"start"}"#);

            let json = serde_json::to_string(&IpcRequest::Reset).unwrap();
            assert_eq!(json, r#"{"command":"reset"}"#);

            let json = serde_json::to_string(&IpcRequest::Status).unwrap();
            assert_eq!(json, r#"{"command":"status"}"#);
        }

        #[test]
        fn test_request_deserialize() {
            let request: IpcRequest = serde_json::from_str(r#"{"command":"reset"}"#).unwrap();
            assert!(matches!(request, IpcRequest::Reset));
        }

        #[test]
        fn test_response_success() {
            let response = IpcResponse::success(
                "Timer started",
                Some(ResponseData {
                    state: Some("work".to_string()),
                    remaining_seconds: Some(1500),
                    repetition_count: Some(2),
                    completed_work_sessions: Some(0),
                    tally: Some(String::new()),
                }),
            );

            assert_eq!(response.status, "success");
            assert_eq!(response.message, "Timer started");

            let data = response.data.unwrap();
            assert_eq!(data.state, Some("work".to_string()));
            assert_eq!(data.remaining_seconds, Some(1500));
        }

        #[test]
        fn test_response_error() {
            let response = IpcResponse::error("A session is already running");
            assert_eq!(response.status, "error");
            assert!(response.data.is_none());
        }

        #[test]
        fn test_response_serialize_field_names() {
            let response = IpcResponse::success(
                "",
                Some(ResponseData {
                    state: Some("work".to_string()),
                    remaining_seconds: Some(1500),
                    repetition_count: Some(2),
                    completed_work_sessions: Some(1),
                    tally: Some("✔".to_string()),
                }),
            );

            let json = serde_json::to_string(&response).unwrap();
            assert!(json.contains("\"remainingSeconds\":1500"));
            assert!(json.contains("\"repetitionCount\":2"));
            assert!(json.contains("\"completedWorkSessions\":1"));
        }

        #[test]
        fn test_response_skips_absent_fields() {
            let response = IpcResponse::success("Done", None);
            let json = serde_json::to_string(&response).unwrap();
            assert!(!json.contains("data"));
        }
    }
}
