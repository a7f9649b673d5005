use super::{round1, window_start};
use crate::models::HabitLog;
use chrono::NaiveDate;
use serde::Serialize;

/// Completion counts over a trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompletionStats {
    /// Days in the window with a completed log.
    pub completed: u32,
    /// Always the window size: the window spans exactly N trailing days
    /// regardless of when the habit was created, so percentages stay
    /// comparable across habits of different ages.
    pub total: u32,
    /// completed / total * 100, one decimal place.
    pub percentage: f64,
}

/// Count completed days in the N-day window ending at and including
/// `as_of`. `window_days` has already passed the Window Policy, so it
/// is at least 1 and division cannot blow up.
pub fn completion_stats(
    logs: &[HabitLog],
    window_days: u32,
    as_of: NaiveDate,
) -> CompletionStats {
    let start = window_start(window_days, as_of);
    let completed = logs
        .iter()
        .filter(|log| log.completed && log.date >= start && log.date <= as_of)
        .count();
    let completed = u32::try_from(completed).unwrap_or(u32::MAX);

    CompletionStats {
        completed,
        total: window_days,
        percentage: round1(f64::from(completed) / f64::from(window_days) * 100.0),
    }
}
