//! Focus/break countdown engine.
//!
//! The engine is a caller-driven state machine. It does not use internal
//! threads or timers - the caller invokes `tick()` once per wall-clock second
//! while it wants the countdown to run. Each tick takes exactly one second
//! off the clock, floored at zero; elapsed time between ticks is not
//! reconciled (accepted imprecision).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running        (start/toggle, time left > 0)
//! Running -> Idle        (pause/toggle, or automatically at zero)
//! ```
//!
//! Reaching zero ends the segment, never the system: the mode flips and the
//! next segment is armed with its configured duration, left Idle until the
//! caller starts it.

use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    Focus,
    Break,
}

impl SessionMode {
    pub fn flipped(&self) -> SessionMode {
        match self {
            SessionMode::Focus => SessionMode::Break,
            SessionMode::Break => SessionMode::Focus,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionMode::Focus => "Focus Session",
            SessionMode::Break => "Break Time",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
}

/// Emitted by commands and ticks that change timer state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TimerEvent {
    Started {
        mode: SessionMode,
        time_left_secs: u64,
        at: chrono::DateTime<Utc>,
    },
    Paused {
        mode: SessionMode,
        time_left_secs: u64,
        at: chrono::DateTime<Utc>,
    },
    Reset {
        mode: SessionMode,
        time_left_secs: u64,
        at: chrono::DateTime<Utc>,
    },
    /// A segment ran down to zero. The engine has already flipped the mode
    /// and armed the next segment.
    SegmentCompleted {
        completed: SessionMode,
        completed_duration_secs: u64,
        next: SessionMode,
        next_duration_secs: u64,
        at: chrono::DateTime<Utc>,
    },
}

/// Single focus/break countdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusTimer {
    focus_secs: u64,
    break_secs: u64,
    mode: SessionMode,
    phase: TimerPhase,
    time_left_secs: u64,
}

impl FocusTimer {
    /// Create a timer armed for a focus segment, idle.
    pub fn new(focus_secs: u64, break_secs: u64) -> Self {
        Self {
            focus_secs,
            break_secs,
            mode: SessionMode::Focus,
            phase: TimerPhase::Idle,
            time_left_secs: focus_secs,
        }
    }

    pub fn from_minutes(focus_min: u32, break_min: u32) -> Self {
        Self::new(u64::from(focus_min) * 60, u64::from(break_min) * 60)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    pub fn time_left_secs(&self) -> u64 {
        self.time_left_secs
    }

    /// Configured duration of the current mode's segment.
    pub fn segment_secs(&self) -> u64 {
        match self.mode {
            SessionMode::Focus => self.focus_secs,
            SessionMode::Break => self.break_secs,
        }
    }

    /// 0.0 .. 1.0 progress within the current segment.
    pub fn progress(&self) -> f64 {
        let total = self.segment_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.time_left_secs as f64 / total as f64)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<TimerEvent> {
        if self.phase == TimerPhase::Running || self.time_left_secs == 0 {
            return None;
        }
        self.phase = TimerPhase::Running;
        Some(TimerEvent::Started {
            mode: self.mode,
            time_left_secs: self.time_left_secs,
            at: Utc::now(),
        })
    }

    /// Stop counting without touching the remaining time.
    pub fn pause(&mut self) -> Option<TimerEvent> {
        if self.phase != TimerPhase::Running {
            return None;
        }
        self.phase = TimerPhase::Idle;
        Some(TimerEvent::Paused {
            mode: self.mode,
            time_left_secs: self.time_left_secs,
            at: Utc::now(),
        })
    }

    /// Flip between running and idle.
    pub fn toggle(&mut self) -> Option<TimerEvent> {
        match self.phase {
            TimerPhase::Running => self.pause(),
            TimerPhase::Idle => self.start(),
        }
    }

    /// Re-arm the current mode's segment at full duration, idle.
    pub fn reset(&mut self) -> Option<TimerEvent> {
        self.phase = TimerPhase::Idle;
        self.time_left_secs = self.segment_secs();
        Some(TimerEvent::Reset {
            mode: self.mode,
            time_left_secs: self.time_left_secs,
            at: Utc::now(),
        })
    }

    /// Take one second off the clock. Call once per wall-clock second while
    /// the countdown should run; no-op unless running. Returns
    /// `Some(TimerEvent::SegmentCompleted)` on the tick that reaches zero.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.phase != TimerPhase::Running {
            return None;
        }
        self.time_left_secs = self.time_left_secs.saturating_sub(1);
        if self.time_left_secs > 0 {
            return None;
        }
        Some(self.complete_segment())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_segment(&mut self) -> TimerEvent {
        let completed = self.mode;
        let completed_duration_secs = self.segment_secs();
        self.phase = TimerPhase::Idle;
        self.mode = self.mode.flipped();
        self.time_left_secs = self.segment_secs();
        TimerEvent::SegmentCompleted {
            completed,
            completed_duration_secs,
            next: self.mode,
            next_duration_secs: self.time_left_secs,
            at: Utc::now(),
        }
    }
}
