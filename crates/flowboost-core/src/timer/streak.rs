//! Derived focus streak counter.
//!
//! The streak is never stored: it is recomputed from focus-session
//! completion timestamps. A streak is the run of consecutive calendar days,
//! ending today, each with at least one completed focus segment. A streak
//! that ran through yesterday but has no completion yet today is still
//! alive at its previous length.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeSet;

/// Count the current streak in days as of `today`.
pub fn current_streak(completions: &[DateTime<Utc>], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = completions.iter().map(|t| t.date_naive()).collect();

    let mut day = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    loop {
        streak += 1;
        match day.pred_opt() {
            Some(prev) if days.contains(&prev) => day = prev,
            _ => return streak,
        }
    }
}

/// Accumulates completion timestamps for one app instance and answers
/// streak queries against them.
#[derive(Debug, Default)]
pub struct StreakTracker {
    completions: Vec<DateTime<Utc>>,
}

impl StreakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a focus-session completion and return the streak it produces.
    pub fn record(&mut self, at: DateTime<Utc>) -> u32 {
        self.completions.push(at);
        current_streak(&self.completions, at.date_naive())
    }

    pub fn current(&self, today: NaiveDate) -> u32 {
        current_streak(&self.completions, today)
    }

    pub fn completions(&self) -> &[DateTime<Utc>] {
        &self.completions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_completions_no_streak() {
        assert_eq!(current_streak(&[], day(2026, 3, 10)), 0);
    }

    #[test]
    fn single_completion_today() {
        assert_eq!(current_streak(&[at(2026, 3, 10)], day(2026, 3, 10)), 1);
    }

    #[test]
    fn consecutive_days_count() {
        let completions = [at(2026, 3, 8), at(2026, 3, 9), at(2026, 3, 10)];
        assert_eq!(current_streak(&completions, day(2026, 3, 10)), 3);
    }

    #[test]
    fn same_day_duplicates_count_once() {
        let completions = [at(2026, 3, 9), at(2026, 3, 10), at(2026, 3, 10)];
        assert_eq!(current_streak(&completions, day(2026, 3, 10)), 2);
    }

    #[test]
    fn gap_breaks_the_streak() {
        let completions = [at(2026, 3, 6), at(2026, 3, 7), at(2026, 3, 10)];
        assert_eq!(current_streak(&completions, day(2026, 3, 10)), 1);
    }

    #[test]
    fn yesterday_streak_still_alive_today() {
        let completions = [at(2026, 3, 8), at(2026, 3, 9)];
        assert_eq!(current_streak(&completions, day(2026, 3, 10)), 2);
    }

    #[test]
    fn two_day_old_streak_is_dead() {
        let completions = [at(2026, 3, 7), at(2026, 3, 8)];
        assert_eq!(current_streak(&completions, day(2026, 3, 10)), 0);
    }

    #[test]
    fn tracker_records_and_grows() {
        let mut tracker = StreakTracker::new();
        assert_eq!(tracker.record(at(2026, 3, 9)), 1);
        assert_eq!(tracker.record(at(2026, 3, 9)), 1);
        assert_eq!(tracker.record(at(2026, 3, 10)), 2);
        assert_eq!(tracker.current(day(2026, 3, 10)), 2);
    }
}
