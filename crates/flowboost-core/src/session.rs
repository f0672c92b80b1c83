//! Engagement session tracking.
//!
//! One session brackets one app instance: it opens with `session_start`,
//! closes with `session_end`, and accumulates the focus time and completion
//! counters the closing event reports. The session value is passed
//! explicitly to whoever emits events -- there is no ambient
//! "current session" lookup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::events::{EventKind, TelemetryEvent};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementSession {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub focus_seconds: u64,
    pub tasks_completed: u32,
    pub microsteps_completed: u32,
    paused: bool,
}

impl EngagementSession {
    /// Open a session and hand back its opening event.
    pub fn begin() -> (Self, TelemetryEvent) {
        let session = Self {
            id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            ended_at: None,
            focus_seconds: 0,
            tasks_completed: 0,
            microsteps_completed: 0,
            paused: false,
        };
        let event = session.event(EventKind::SessionStart);
        (session, event)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stamp an event with this session's id.
    pub fn event(&self, kind: EventKind) -> TelemetryEvent {
        TelemetryEvent::new(kind).with("sessionId", self.id.as_str())
    }

    /// The user stepped away. Idempotent: `None` while already paused.
    pub fn pause(&mut self) -> Option<TelemetryEvent> {
        if self.paused {
            return None;
        }
        self.paused = true;
        Some(self.event(EventKind::SessionPause))
    }

    /// The user came back. Idempotent: `None` unless paused.
    pub fn resume(&mut self) -> Option<TelemetryEvent> {
        if !self.paused {
            return None;
        }
        self.paused = false;
        Some(self.event(EventKind::SessionResume))
    }

    pub fn record_focus(&mut self, seconds: u64) {
        self.focus_seconds += seconds;
    }

    pub fn record_task_completed(&mut self) {
        self.tasks_completed += 1;
    }

    pub fn record_microstep_completed(&mut self) {
        self.microsteps_completed += 1;
    }

    /// Close the session and hand back its closing event with the
    /// accumulated counters.
    pub fn end(&mut self) -> TelemetryEvent {
        let now = Utc::now();
        self.ended_at = Some(now);
        self.event(EventKind::SessionEnd)
            .with("totalFocusTime", self.focus_seconds)
            .with("tasksCompleted", self.tasks_completed)
            .with("microstepsCompleted", self.microsteps_completed)
    }
}
