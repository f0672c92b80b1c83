//! Notification dispatch on segment completion.
//!
//! Delivery is environment-specific, so the dispatcher talks to a
//! [`NotificationSink`] trait; the CLI installs a terminal sink, tests
//! install fakes. All delivery failures are logged and swallowed - a missed
//! chime never surfaces to the user.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::NotificationsConfig;
use crate::timer::SessionMode;

/// Answer of the environment's permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// Not answered yet; may be asked again after the cool-down.
    Default,
    Granted,
    Denied,
}

/// Environment-specific delivery of sound cues and visual notifications.
pub trait NotificationSink {
    /// Play the fixed completion cue.
    fn play_sound(&self) -> Result<(), Box<dyn std::error::Error>>;

    /// Ask the environment for permission to show visual notifications.
    fn request_permission(&self) -> Permission;

    /// Raise a visual notification.
    fn show(&self, title: &str, body: &str) -> Result<(), Box<dyn std::error::Error>>;
}

/// Seconds between permission prompts while the environment keeps answering
/// `Default`.
const REQUEST_COOLDOWN_SECS: i64 = 30;

/// Mode-specific notification copy for the segment that just finished.
pub fn segment_message(completed: SessionMode) -> (&'static str, &'static str) {
    match completed {
        SessionMode::Focus => ("Focus session complete", "Time for a refreshing break."),
        SessionMode::Break => ("Break finished", "Ready for the next focus session?"),
    }
}

/// Decides, per completed segment, whether to chime and/or notify.
///
/// Tracks the permission answer across the app instance: `Granted` and
/// `Denied` are cached forever (a denial is never re-prompted), `Default`
/// re-prompts at most once per cool-down.
#[derive(Debug)]
pub struct NotificationDispatcher {
    permission: Permission,
    last_request: Option<DateTime<Utc>>,
}

impl Default for NotificationDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationDispatcher {
    pub fn new() -> Self {
        Self {
            permission: Permission::Default,
            last_request: None,
        }
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    /// Deliver completion feedback for `completed` according to `prefs`.
    pub fn notify(
        &mut self,
        sink: &dyn NotificationSink,
        prefs: &NotificationsConfig,
        completed: SessionMode,
        now: DateTime<Utc>,
    ) {
        if prefs.sound {
            if let Err(e) = sink.play_sound() {
                tracing::warn!(error = %e, "notification sound failed");
            }
        }

        if prefs.visual && self.ensure_permission(sink, now) == Permission::Granted {
            let (title, body) = segment_message(completed);
            if let Err(e) = sink.show(title, body) {
                tracing::warn!(error = %e, "visual notification failed");
            }
        }
    }

    fn ensure_permission(&mut self, sink: &dyn NotificationSink, now: DateTime<Utc>) -> Permission {
        if self.permission != Permission::Default {
            return self.permission;
        }
        let cooled_down = self
            .last_request
            .map_or(true, |t| now - t >= Duration::seconds(REQUEST_COOLDOWN_SECS));
        if cooled_down {
            self.last_request = Some(now);
            self.permission = sink.request_permission();
            if self.permission == Permission::Denied {
                tracing::debug!("notification permission denied; will not re-prompt");
            }
        }
        self.permission
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::cell::RefCell;

    struct FakeSink {
        answer: Permission,
        sound_fails: bool,
        requests: RefCell<u32>,
        sounds: RefCell<u32>,
        shown: RefCell<Vec<(String, String)>>,
    }

    impl FakeSink {
        fn new(answer: Permission) -> Self {
            Self {
                answer,
                sound_fails: false,
                requests: RefCell::new(0),
                sounds: RefCell::new(0),
                shown: RefCell::new(Vec::new()),
            }
        }
    }

    impl NotificationSink for FakeSink {
        fn play_sound(&self) -> Result<(), Box<dyn std::error::Error>> {
            *self.sounds.borrow_mut() += 1;
            if self.sound_fails {
                return Err("audio blocked".into());
            }
            Ok(())
        }

        fn request_permission(&self) -> Permission {
            *self.requests.borrow_mut() += 1;
            self.answer
        }

        fn show(&self, title: &str, body: &str) -> Result<(), Box<dyn std::error::Error>> {
            self.shown.borrow_mut().push((title.into(), body.into()));
            Ok(())
        }
    }

    fn prefs(sound: bool, visual: bool) -> NotificationsConfig {
        NotificationsConfig {
            sound,
            visual,
            reminders: true,
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap()
    }

    #[test]
    fn granted_permission_shows_mode_specific_copy() {
        let sink = FakeSink::new(Permission::Granted);
        let mut dispatcher = NotificationDispatcher::new();
        dispatcher.notify(&sink, &prefs(false, true), SessionMode::Focus, t0());

        let shown = sink.shown.borrow();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, "Focus session complete");
        assert_eq!(*sink.sounds.borrow(), 0, "sound disabled");
    }

    #[test]
    fn denied_permission_is_never_reprompted() {
        let sink = FakeSink::new(Permission::Denied);
        let mut dispatcher = NotificationDispatcher::new();
        dispatcher.notify(&sink, &prefs(false, true), SessionMode::Focus, t0());
        dispatcher.notify(
            &sink,
            &prefs(false, true),
            SessionMode::Break,
            t0() + Duration::seconds(600),
        );

        assert_eq!(*sink.requests.borrow(), 1);
        assert!(sink.shown.borrow().is_empty());
        assert_eq!(dispatcher.permission(), Permission::Denied);
    }

    #[test]
    fn default_answer_reprompts_only_after_cooldown() {
        let sink = FakeSink::new(Permission::Default);
        let mut dispatcher = NotificationDispatcher::new();
        let p = prefs(false, true);

        dispatcher.notify(&sink, &p, SessionMode::Focus, t0());
        dispatcher.notify(&sink, &p, SessionMode::Focus, t0() + Duration::seconds(5));
        assert_eq!(*sink.requests.borrow(), 1, "within cool-down: no re-prompt");

        dispatcher.notify(
            &sink,
            &p,
            SessionMode::Focus,
            t0() + Duration::seconds(REQUEST_COOLDOWN_SECS),
        );
        assert_eq!(*sink.requests.borrow(), 2, "cool-down elapsed: one re-prompt");
    }

    #[test]
    fn sound_failure_is_swallowed() {
        let mut sink = FakeSink::new(Permission::Granted);
        sink.sound_fails = true;
        let mut dispatcher = NotificationDispatcher::new();
        // Must not panic or propagate.
        dispatcher.notify(&sink, &prefs(true, true), SessionMode::Break, t0());
        assert_eq!(*sink.sounds.borrow(), 1);
        assert_eq!(sink.shown.borrow().len(), 1, "visual path unaffected");
    }

    #[test]
    fn disabled_prefs_do_nothing() {
        let sink = FakeSink::new(Permission::Granted);
        let mut dispatcher = NotificationDispatcher::new();
        dispatcher.notify(&sink, &prefs(false, false), SessionMode::Focus, t0());
        assert_eq!(*sink.requests.borrow(), 0);
        assert_eq!(*sink.sounds.borrow(), 0);
        assert!(sink.shown.borrow().is_empty());
    }
}
