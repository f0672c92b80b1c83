mod engine;
mod streak;

pub use engine::{FocusTimer, SessionMode, TimerEvent, TimerPhase};
pub use streak::{current_streak, StreakTracker};
