//! Pure consistency computations over completion logs.
//!
//! Nothing in here touches storage or holds state: every function is a
//! plain computation over the records passed in, re-derived on each
//! call. Correctness after a log mutation follows from recomputing, not
//! from cache invalidation.

mod heatmap;
mod rollup;
mod stats;
mod streaks;

pub use heatmap::{heatmap, HeatmapDay};
pub use rollup::{rollup, HabitCompletion, Rollup};
pub use stats::{completion_stats, CompletionStats};
pub use streaks::{streaks, StreakSummary};

use chrono::{Duration, NaiveDate};

/// First day of an N-day window ending at and including `as_of`.
pub fn window_start(window_days: u32, as_of: NaiveDate) -> NaiveDate {
    as_of - Duration::days(i64::from(window_days) - 1)
}

/// Round to one decimal place, the precision all percentages carry.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
