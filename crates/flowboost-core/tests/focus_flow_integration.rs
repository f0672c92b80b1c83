//! Integration tests for the add-task / focus / celebrate flow.

use chrono::{Duration, TimeZone, Utc};
use flowboost_core::notify::{segment_message, NotificationDispatcher, NotificationSink, Permission};
use flowboost_core::storage::NotificationsConfig;
use flowboost_core::{
    CelebrationKind, CelebrationState, EngagementSession, EventKind, FocusTimer, MicroStep,
    Priority, SessionMode, StreakTracker, TaskStore, TimerEvent,
};
use std::cell::RefCell;

#[test]
fn add_complete_delete_scenario() {
    let (mut session, start_event) = EngagementSession::begin();
    assert_eq!(start_event.kind, EventKind::SessionStart);

    let mut store = TaskStore::new();
    let mut celebrations = CelebrationState::new();

    // Add "Write report" with priority High and no micro-steps.
    let created = store
        .add_task("Write report", Priority::High, Vec::new())
        .expect("non-empty title is accepted");
    assert_eq!(store.len(), 1);
    assert_eq!(store.tasks()[0].priority, Priority::High);
    assert!(!store.tasks()[0].completed);
    assert_eq!(
        created.telemetry(&session).unwrap().kind,
        EventKind::TaskCreated
    );

    // Toggle completion: a "task" celebration and a task_completed event.
    let id = store.tasks()[0].id.clone();
    let completed = store.toggle_task(&id).unwrap();
    assert!(store.tasks()[0].completed);
    let kind = completed.celebration().unwrap();
    assert_eq!(kind, CelebrationKind::Task);
    celebrations.trigger(kind, None, Utc::now());
    assert!(celebrations.current().is_some());
    session.record_task_completed();

    let telemetry = completed.telemetry(&session).unwrap();
    assert_eq!(telemetry.kind, EventKind::TaskCompleted);
    assert_eq!(telemetry.data["title"], "Write report");

    // Delete: list is empty, second delete is a no-op.
    assert!(store.delete_task(&id).is_some());
    assert!(store.is_empty());
    assert!(store.delete_task(&id).is_none());

    let end_event = session.end();
    assert_eq!(end_event.data["tasksCompleted"], 1);
}

#[test]
fn micro_step_completion_is_isolated_and_counted() {
    let (mut session, _) = EngagementSession::begin();
    let mut store = TaskStore::new();
    store.add_task(
        "Plan sprint",
        Priority::Medium,
        vec![MicroStep::new("Collect topics"), MicroStep::new("Book room")],
    );
    let task_id = store.tasks()[0].id.clone();
    let step_id = store.tasks()[0].micro_steps[1].id.clone();

    let event = store.toggle_micro_step(&task_id, &step_id).unwrap();
    assert_eq!(event.celebration(), Some(CelebrationKind::MicroStep));
    session.record_microstep_completed();

    let task = &store.tasks()[0];
    assert!(!task.completed);
    assert!(!task.micro_steps[0].completed);
    assert!(task.micro_steps[1].completed);

    assert_eq!(session.end().data["microstepsCompleted"], 1);
}

struct CountingSink {
    sounds: RefCell<u32>,
    shown: RefCell<Vec<String>>,
}

impl NotificationSink for CountingSink {
    fn play_sound(&self) -> Result<(), Box<dyn std::error::Error>> {
        *self.sounds.borrow_mut() += 1;
        Ok(())
    }

    fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    fn show(&self, title: &str, _body: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.shown.borrow_mut().push(title.to_string());
        Ok(())
    }
}

#[test]
fn focus_segment_end_to_end() {
    // 25 minute focus / 5 minute break, driven tick by tick.
    let (mut session, _) = EngagementSession::begin();
    let mut timer = FocusTimer::from_minutes(25, 5);
    let mut celebrations = CelebrationState::new();
    let mut dispatcher = NotificationDispatcher::new();
    let mut streak = StreakTracker::new();
    let sink = CountingSink {
        sounds: RefCell::new(0),
        shown: RefCell::new(Vec::new()),
    };
    let prefs = NotificationsConfig::default();

    timer.start();
    let mut completions = Vec::new();
    for _ in 0..1500 {
        if let Some(event) = timer.tick() {
            completions.push(event);
        }
    }
    assert_eq!(completions.len(), 1, "exactly one session-complete per run-down");

    match &completions[0] {
        TimerEvent::SegmentCompleted {
            completed,
            completed_duration_secs,
            next,
            next_duration_secs,
            at,
        } => {
            assert_eq!(*completed, SessionMode::Focus);
            assert_eq!(*completed_duration_secs, 1500);
            assert_eq!(*next, SessionMode::Break);
            assert_eq!(*next_duration_secs, 300);

            session.record_focus(*completed_duration_secs);
            let s = streak.record(*at);
            assert_eq!(s, 1);
            celebrations.trigger(
                CelebrationKind::Session,
                Some("Focus session completed! Time for a refreshing break!".into()),
                *at,
            );
            dispatcher.notify(&sink, &prefs, *completed, *at);
        }
        other => panic!("expected SegmentCompleted, got {other:?}"),
    }

    assert_eq!(timer.mode(), SessionMode::Break);
    assert_eq!(timer.time_left_secs(), 300);
    assert!(!timer.is_running());

    assert_eq!(*sink.sounds.borrow(), 1);
    assert_eq!(sink.shown.borrow().as_slice(), ["Focus session complete"]);
    assert_eq!(
        sink.shown.borrow()[0],
        segment_message(SessionMode::Focus).0
    );

    // Celebration expires after its dismiss window.
    let shown_at = celebrations.current().unwrap().shown_at;
    assert!(!celebrations.clear_expired(shown_at + Duration::seconds(1)));
    assert!(celebrations.clear_expired(shown_at + Duration::seconds(10)));

    assert_eq!(session.end().data["totalFocusTime"], 1500);
}

#[test]
fn streak_counts_only_consecutive_days() {
    let mut streak = StreakTracker::new();
    let day1 = Utc.with_ymd_and_hms(2026, 3, 9, 10, 0, 0).unwrap();
    let day2 = Utc.with_ymd_and_hms(2026, 3, 10, 9, 30, 0).unwrap();
    let day4 = Utc.with_ymd_and_hms(2026, 3, 12, 11, 0, 0).unwrap();

    assert_eq!(streak.record(day1), 1);
    assert_eq!(streak.record(day2), 2);
    assert_eq!(streak.record(day4), 1, "a missed day resets the run");
}
