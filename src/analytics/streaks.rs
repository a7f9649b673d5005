use crate::models::HabitLog;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

/// Current and best-ever runs of consecutive completed days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakSummary {
    pub current: u32,
    pub best: u32,
}

/// Compute streaks from one habit's full completion history. Input
/// order does not matter; only rows with `completed = true` count.
pub fn streaks(logs: &[HabitLog], today: NaiveDate) -> StreakSummary {
    let completed: HashSet<NaiveDate> = logs
        .iter()
        .filter(|log| log.completed)
        .map(|log| log.date)
        .collect();

    StreakSummary {
        current: current_streak(&completed, today),
        best: best_streak(&completed),
    }
}

/// Walk backward from `today`, counting consecutive completed days. A
/// habit not yet logged today is not yet broken: an absent `today` is
/// skipped and the walk starts at yesterday. The first missing day
/// after that ends the run.
fn current_streak(completed: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut day = if completed.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) => yesterday,
            None => return 0,
        }
    };

    let mut streak = 0;
    while completed.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// Longest run of calendar-consecutive completed days over the whole
/// history. A gap of more than one day ends a run.
fn best_streak(completed: &HashSet<NaiveDate>) -> u32 {
    let mut dates: Vec<NaiveDate> = completed.iter().copied().collect();
    dates.sort_unstable();

    let mut best = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;
    for date in dates {
        run = match prev {
            Some(p) if p.succ_opt() == Some(date) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(date);
    }
    best
}
