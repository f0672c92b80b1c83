//! Celebration trigger.
//!
//! Completion events map to a transient congratulatory message with an
//! auto-dismiss deadline. At most one celebration is live at a time: a new
//! trigger overwrites whatever is showing (last-write-wins, no queueing).

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Seconds a celebration stays on screen before the holder reports it
/// expired.
pub const DISMISS_AFTER_SECS: i64 = 4;

/// What kind of completion is being celebrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CelebrationKind {
    Task,
    MicroStep,
    Session,
    Streak,
}

impl CelebrationKind {
    pub fn title(&self) -> &'static str {
        match self {
            CelebrationKind::Task => "Well done!",
            CelebrationKind::MicroStep => "Nice progress!",
            CelebrationKind::Session => "Focus Complete!",
            CelebrationKind::Streak => "Awesome Streak!",
        }
    }

    /// Fallback message when the caller supplies none.
    pub fn default_message(&self) -> &'static str {
        match self {
            CelebrationKind::Task => "Task completed! Great job!",
            CelebrationKind::MicroStep => "Micro-step completed! Progress feels good!",
            CelebrationKind::Session => "Focus session complete! Take a well-deserved break.",
            CelebrationKind::Streak => "Amazing streak! You're building momentum!",
        }
    }
}

/// One live celebration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Celebration {
    pub kind: CelebrationKind,
    pub message: String,
    pub shown_at: DateTime<Utc>,
}

impl Celebration {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.shown_at + Duration::seconds(DISMISS_AFTER_SECS)
    }
}

/// Holds the single live celebration, if any.
#[derive(Debug, Default)]
pub struct CelebrationState {
    current: Option<Celebration>,
}

impl CelebrationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a celebration, replacing any current one.
    pub fn trigger(
        &mut self,
        kind: CelebrationKind,
        message: Option<String>,
        at: DateTime<Utc>,
    ) -> &Celebration {
        self.current.insert(Celebration {
            kind,
            message: message.unwrap_or_else(|| kind.default_message().to_string()),
            shown_at: at,
        })
    }

    pub fn current(&self) -> Option<&Celebration> {
        self.current.as_ref()
    }

    /// Drop the celebration once its deadline passes. Returns true if one
    /// was cleared on this call.
    pub fn clear_expired(&mut self, now: DateTime<Utc>) -> bool {
        match &self.current {
            Some(c) if now >= c.expires_at() => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

/// Messages shown at app start, one picked at random per run.
pub const ENCOURAGING_MESSAGES: [&str; 5] = [
    "You've got this! Take the first step.",
    "Remember: progress over perfection.",
    "Small steps lead to big achievements.",
    "Focus on what matters most.",
    "Every minute of focus counts!",
];

pub fn pick_encouragement() -> &'static str {
    ENCOURAGING_MESSAGES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(ENCOURAGING_MESSAGES[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap()
    }

    #[test]
    fn trigger_uses_default_message_when_none_given() {
        let mut state = CelebrationState::new();
        let c = state.trigger(CelebrationKind::Task, None, t0());
        assert_eq!(c.message, "Task completed! Great job!");
        assert_eq!(c.kind, CelebrationKind::Task);
    }

    #[test]
    fn explicit_message_wins_over_default() {
        let mut state = CelebrationState::new();
        let c = state.trigger(
            CelebrationKind::Session,
            Some("Focus session completed! Time for a refreshing break!".into()),
            t0(),
        );
        assert!(c.message.starts_with("Focus session completed!"));
    }

    #[test]
    fn new_trigger_overwrites_current() {
        let mut state = CelebrationState::new();
        state.trigger(CelebrationKind::Task, None, t0());
        state.trigger(CelebrationKind::MicroStep, None, t0());
        assert_eq!(state.current().unwrap().kind, CelebrationKind::MicroStep);
    }

    #[test]
    fn expires_after_dismiss_window() {
        let mut state = CelebrationState::new();
        state.trigger(CelebrationKind::Task, None, t0());

        let before = t0() + Duration::seconds(DISMISS_AFTER_SECS - 1);
        assert!(!state.clear_expired(before));
        assert!(state.current().is_some());

        let after = t0() + Duration::seconds(DISMISS_AFTER_SECS);
        assert!(state.clear_expired(after));
        assert!(state.current().is_none());
        assert!(!state.clear_expired(after), "already cleared");
    }

    #[test]
    fn encouragement_comes_from_the_fixed_list() {
        let msg = pick_encouragement();
        assert!(ENCOURAGING_MESSAGES.contains(&msg));
    }
}
