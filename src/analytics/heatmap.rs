use super::window_start;
use crate::models::HabitLog;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One calendar day of set-wide completion density.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatmapDay {
    pub date: NaiveDate,
    /// Habits in the set completed on this day.
    pub completed_count: u32,
    /// Size of the habit set, constant across the window.
    pub total_habits: u32,
    /// completed_count / total_habits; 0.0 when the set is empty, which
    /// callers must present as "no data" rather than an empty day.
    pub density: f64,
}

/// Per-day completion density for a habit set over a trailing window,
/// oldest day first. Recomputed in full on every call; there is no
/// incremental state to go stale.
pub fn heatmap(
    habit_ids: &[i64],
    logs: &[HabitLog],
    window_days: u32,
    as_of: NaiveDate,
) -> Vec<HeatmapDay> {
    let members: HashSet<i64> = habit_ids.iter().copied().collect();
    let total_habits = u32::try_from(members.len()).unwrap_or(u32::MAX);
    let start = window_start(window_days, as_of);

    let mut counts: HashMap<NaiveDate, u32> = HashMap::new();
    for log in logs {
        if log.completed
            && members.contains(&log.habit_id)
            && log.date >= start
            && log.date <= as_of
        {
            *counts.entry(log.date).or_insert(0) += 1;
        }
    }

    start
        .iter_days()
        .take(window_days as usize)
        .map(|date| {
            let completed_count = counts.get(&date).copied().unwrap_or(0);
            let density = if total_habits == 0 {
                0.0
            } else {
                f64::from(completed_count) / f64::from(total_habits)
            };
            HeatmapDay { date, completed_count, total_habits, density }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn log(habit_id: i64, date: NaiveDate, completed: bool) -> HabitLog {
        HabitLog {
            id: 0,
            habit_id,
            date,
            completed,
            created_at: Utc::now(),
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    #[test]
    fn test_one_entry_per_day_oldest_first() {
        let days = heatmap(&[1], &[], 7, as_of());
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date, as_of() - Duration::days(6));
        assert_eq!(days[6].date, as_of());
    }

    #[test]
    fn test_density_extremes() {
        let d = as_of();
        let logs = vec![log(1, d, true), log(2, d, true)];

        let days = heatmap(&[1, 2], &logs, 2, d);
        // Yesterday: no completions at all
        assert_eq!(days[0].completed_count, 0);
        assert_eq!(days[0].density, 0.0);
        // Today: every habit in the set completed
        assert_eq!(days[1].completed_count, 2);
        assert_eq!(days[1].density, 1.0);
    }

    #[test]
    fn test_partial_density() {
        let d = as_of();
        let logs = vec![log(1, d, true)];

        let days = heatmap(&[1, 2], &logs, 1, d);
        assert_eq!(days[0].completed_count, 1);
        assert_eq!(days[0].total_habits, 2);
        assert_eq!(days[0].density, 0.5);
    }

    #[test]
    fn test_empty_habit_set() {
        let days = heatmap(&[], &[], 3, as_of());
        assert_eq!(days.len(), 3);
        for day in days {
            assert_eq!(day.total_habits, 0);
            assert_eq!(day.density, 0.0);
        }
    }

    #[test]
    fn test_logs_from_outside_the_set_ignored() {
        let d = as_of();
        // Habit 9 is not in the set being aggregated
        let logs = vec![log(9, d, true), log(1, d, true)];

        let days = heatmap(&[1], &logs, 1, d);
        assert_eq!(days[0].completed_count, 1);
    }

    #[test]
    fn test_uncompleted_rows_ignored() {
        let d = as_of();
        let logs = vec![log(1, d, false)];

        let days = heatmap(&[1], &logs, 1, d);
        assert_eq!(days[0].completed_count, 0);
    }
}
