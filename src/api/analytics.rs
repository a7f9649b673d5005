use crate::analytics::{self, completion_stats, streaks, window_start, HabitCompletion};
use crate::error::AppError;
use crate::filter::{self, HabitFilter};
use crate::models::{Category, Habit, HabitLog, HabitTag};
use crate::validation::resolve_tracking_days;
use chrono::{NaiveDate, Utc};
use rusqlite::Connection;

use super::{owned_category, owned_habit, owned_tag, require_user};
use super::{HabitStatisticsResponse, HeatmapResponse, RollupResponse, UserOverviewResponse};

/// Scope and window parameters for set-level analytics.
#[derive(Debug, Default)]
pub struct AnalyticsQuery {
    pub category_id: Option<i64>,
    pub tag_ids: Vec<i64>,
    pub tracking_days: Option<i64>,
    pub as_of: Option<NaiveDate>,
}

/// Full consistency picture for one habit: streaks plus windowed stats.
pub fn habit_statistics(
    conn: &Connection,
    user_id: i64,
    habit_id: i64,
    tracking_days: Option<i64>,
    as_of: Option<NaiveDate>,
) -> Result<HabitStatisticsResponse, AppError> {
    let user = require_user(conn, user_id)?;
    let habit = owned_habit(conn, habit_id, user_id)?;
    let window = resolve_tracking_days(
        tracking_days.or(habit.tracking_days),
        user.default_tracking_days,
    )?;
    let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());

    let logs = HabitLog::find_for_habit(conn, habit_id)?;
    let stats = completion_stats(&logs, window, as_of);
    let streak_summary = streaks(&logs, as_of);

    Ok(HabitStatisticsResponse {
        habit_id,
        habit_name: habit.name,
        tracking_days: window,
        completed: stats.completed,
        total: stats.total,
        percentage: stats.percentage,
        current_streak: streak_summary.current,
        best_streak: streak_summary.best,
        total_completions: HabitLog::total_completions(conn, habit_id)?,
        last_completion_date: HabitLog::last_completed_date(conn, habit_id)?,
        start_date: window_start(window, as_of),
        end_date: as_of,
    })
}

/// Average completion across the habits in a category.
pub fn category_rollup(
    conn: &Connection,
    user_id: i64,
    category_id: i64,
    tracking_days: Option<i64>,
    as_of: Option<NaiveDate>,
) -> Result<RollupResponse, AppError> {
    let user = require_user(conn, user_id)?;
    let category = owned_category(conn, category_id, user_id)?;
    let window = resolve_tracking_days(tracking_days, user.default_tracking_days)?;
    let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());

    let habits = scoped_habits(conn, user_id, &HabitFilter::by_category(category_id))?;
    group_rollup(conn, category.id, category.name, habits, window, as_of)
}

/// Average completion across the habits carrying a tag.
pub fn tag_rollup(
    conn: &Connection,
    user_id: i64,
    tag_id: i64,
    tracking_days: Option<i64>,
    as_of: Option<NaiveDate>,
) -> Result<RollupResponse, AppError> {
    let user = require_user(conn, user_id)?;
    let tag = owned_tag(conn, tag_id, user_id)?;
    let window = resolve_tracking_days(tracking_days, user.default_tracking_days)?;
    let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());

    let habits = scoped_habits(conn, user_id, &HabitFilter::by_tags([tag_id]))?;
    group_rollup(conn, tag.id, tag.name, habits, window, as_of)
}

/// The whole account at a glance: overall average plus one rollup per
/// category.
pub fn user_overview(
    conn: &Connection,
    user_id: i64,
    tracking_days: Option<i64>,
    as_of: Option<NaiveDate>,
) -> Result<UserOverviewResponse, AppError> {
    let user = require_user(conn, user_id)?;
    let window = resolve_tracking_days(tracking_days, user.default_tracking_days)?;
    let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());

    let habits = Habit::find_for_user(conn, user_id, false)?;
    let total_habits = habits.len();
    let per_habit = windowed_completions(conn, &habits, window, as_of)?;
    let overall = analytics::rollup(per_habit);

    let categories = Category::find_for_user(conn, user_id)?
        .into_iter()
        .map(|category| {
            let members = scoped_habits(conn, user_id, &HabitFilter::by_category(category.id))?;
            group_rollup(conn, category.id, category.name, members, window, as_of)
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(UserOverviewResponse {
        user_id,
        tracking_days: window,
        total_habits,
        average_percentage: overall.average_percentage,
        categories,
    })
}

/// Per-day completion density over a habit scope (all habits, or
/// filtered by category/tags).
pub fn heatmap(
    conn: &Connection,
    user_id: i64,
    query: &AnalyticsQuery,
) -> Result<HeatmapResponse, AppError> {
    let user = require_user(conn, user_id)?;
    if let Some(category_id) = query.category_id {
        owned_category(conn, category_id, user_id)?;
    }
    for &tag_id in &query.tag_ids {
        owned_tag(conn, tag_id, user_id)?;
    }
    let window = resolve_tracking_days(query.tracking_days, user.default_tracking_days)?;
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());

    let habit_filter = HabitFilter {
        category_id: query.category_id,
        tag_ids: query.tag_ids.iter().copied().collect(),
        include_archived: false,
    };
    let habits = scoped_habits(conn, user_id, &habit_filter)?;
    let habit_ids: Vec<i64> = habits.iter().map(|h| h.id).collect();

    let start = window_start(window, as_of);
    let logs = HabitLog::find_for_habits_in_window(conn, &habit_ids, start, as_of)?;
    let days = analytics::heatmap(&habit_ids, &logs, window, as_of);

    Ok(HeatmapResponse {
        tracking_days: window,
        start_date: start,
        end_date: as_of,
        total_habits: u32::try_from(habit_ids.len()).unwrap_or(u32::MAX),
        days,
    })
}

/// Active habits narrowed through the filter engine.
fn scoped_habits(
    conn: &Connection,
    user_id: i64,
    habit_filter: &HabitFilter,
) -> Result<Vec<Habit>, AppError> {
    let habits = Habit::find_for_user(conn, user_id, habit_filter.include_archived)?;
    let tag_sets = HabitTag::tag_sets_for_user(conn, user_id)?;
    Ok(filter::select(habits, &tag_sets, habit_filter))
}

fn windowed_completions(
    conn: &Connection,
    habits: &[Habit],
    window: u32,
    as_of: NaiveDate,
) -> Result<Vec<HabitCompletion>, AppError> {
    let start = window_start(window, as_of);
    habits
        .iter()
        .map(|habit| {
            let logs = HabitLog::find_in_window(conn, habit.id, start, as_of)?;
            Ok(HabitCompletion {
                habit_id: habit.id,
                stats: completion_stats(&logs, window, as_of),
            })
        })
        .collect()
}

fn group_rollup(
    conn: &Connection,
    group_id: i64,
    group_name: String,
    habits: Vec<Habit>,
    window: u32,
    as_of: NaiveDate,
) -> Result<RollupResponse, AppError> {
    let per_habit = windowed_completions(conn, &habits, window, as_of)?;
    Ok(RollupResponse {
        group_id,
        group_name,
        tracking_days: window,
        habit_count: habits.len(),
        rollup: analytics::rollup(per_habit),
    })
}
