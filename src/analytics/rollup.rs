use super::{round1, CompletionStats};
use serde::Serialize;

/// One habit's windowed stats inside a rollup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HabitCompletion {
    pub habit_id: i64,
    pub stats: CompletionStats,
}

/// Averaged completion over a habit set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rollup {
    /// Arithmetic mean of the per-habit percentages. `None` for an
    /// empty set: a category with no habits has no data, which is not
    /// the same thing as zero completion.
    pub average_percentage: Option<f64>,
    pub per_habit: Vec<HabitCompletion>,
}

/// Average per-habit percentages. Agnostic to how the set was chosen;
/// category and tag rollups both feed it through the filter engine.
pub fn rollup(per_habit: Vec<HabitCompletion>) -> Rollup {
    let average_percentage = if per_habit.is_empty() {
        None
    } else {
        let sum: f64 = per_habit.iter().map(|h| h.stats.percentage).sum();
        let count = u32::try_from(per_habit.len()).unwrap_or(u32::MAX);
        Some(round1(sum / f64::from(count)))
    };

    Rollup { average_percentage, per_habit }
}
