//! Telemetry event vocabulary.
//!
//! Every user-visible action produces a [`TelemetryEvent`]: a text event kind
//! plus a flat key/value payload, shipped to the track-event endpoint by the
//! API client. Events are fire-and-forget; losing one is acceptable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Recognized event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    TaskCreated,
    TaskCompleted,
    TaskDeleted,
    MicrostepCompleted,
    FocusSessionCompleted,
    TimerStart,
    TimerPause,
    SessionStart,
    SessionEnd,
    SessionPause,
    SessionResume,
}

impl EventKind {
    /// Wire identifier, as stored in the hosted event table.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::TaskCreated => "task_created",
            EventKind::TaskCompleted => "task_completed",
            EventKind::TaskDeleted => "task_deleted",
            EventKind::MicrostepCompleted => "microstep_completed",
            EventKind::FocusSessionCompleted => "focus_session_completed",
            EventKind::TimerStart => "timer_start",
            EventKind::TimerPause => "timer_pause",
            EventKind::SessionStart => "session_start",
            EventKind::SessionEnd => "session_end",
            EventKind::SessionPause => "session_pause",
            EventKind::SessionResume => "session_resume",
        }
    }
}

/// A single telemetry event with a flat payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryEvent {
    pub kind: EventKind,
    pub data: Map<String, Value>,
    pub at: DateTime<Utc>,
}

impl TelemetryEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            data: Map::new(),
            at: Utc::now(),
        }
    }

    /// Attach a payload entry. Payloads stay flat: values are strings,
    /// numbers, or booleans.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }
}
