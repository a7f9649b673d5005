use crate::analytics::{completion_stats, streaks, window_start};
use crate::error::AppError;
use crate::filter::{self, HabitFilter};
use crate::models::{Habit, HabitLog, HabitTag};
use crate::validation::{resolve_tracking_days, validate_habit_name, validate_tag_count, validate_tracking_days};
use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use std::collections::{HashMap, HashSet};

use super::{owned_category, owned_habit, owned_tag, require_user};
use super::{CreateHabitRequest, DayStatus, HabitOverview, HabitResponse, ToggleResponse, UpdateHabitRequest};

/// Scope and window parameters for the dashboard listing.
#[derive(Debug, Default)]
pub struct HabitQuery {
    pub category_id: Option<i64>,
    pub tag_ids: Vec<i64>,
    pub include_archived: bool,
    pub tracking_days: Option<i64>,
    /// Anchor for all day-window computations; defaults to the current
    /// UTC date.
    pub as_of: Option<NaiveDate>,
}

/// List a user's habits, optionally narrowed by category and tags, each
/// with streaks and windowed completion stats.
pub fn list_habits(
    conn: &Connection,
    user_id: i64,
    query: &HabitQuery,
) -> Result<Vec<HabitOverview>, AppError> {
    let user = require_user(conn, user_id)?;

    if let Some(days) = query.tracking_days {
        validate_tracking_days(days)?;
    }
    if let Some(category_id) = query.category_id {
        owned_category(conn, category_id, user_id)?;
    }
    for &tag_id in &query.tag_ids {
        owned_tag(conn, tag_id, user_id)?;
    }

    let habits = Habit::find_for_user(conn, user_id, query.include_archived)?;
    let tag_sets = HabitTag::tag_sets_for_user(conn, user_id)?;
    let habit_filter = HabitFilter {
        category_id: query.category_id,
        tag_ids: query.tag_ids.iter().copied().collect(),
        include_archived: query.include_archived,
    };
    let selected = filter::select(habits, &tag_sets, &habit_filter);

    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());

    selected
        .into_iter()
        .map(|habit| {
            let window = resolve_tracking_days(
                query.tracking_days.or(habit.tracking_days),
                user.default_tracking_days,
            )?;
            let logs = HabitLog::find_for_habit(conn, habit.id)?;
            Ok(overview(&habit, &logs, &tag_sets, window, as_of))
        })
        .collect()
}

fn overview(
    habit: &Habit,
    logs: &[HabitLog],
    tag_sets: &HashMap<i64, HashSet<i64>>,
    window: u32,
    as_of: NaiveDate,
) -> HabitOverview {
    let stats = completion_stats(logs, window, as_of);
    let streak_summary = streaks(logs, as_of);

    let completed_dates: HashSet<NaiveDate> = logs
        .iter()
        .filter(|log| log.completed)
        .map(|log| log.date)
        .collect();
    let days = window_start(window, as_of)
        .iter_days()
        .take(window as usize)
        .map(|date| DayStatus { date, completed: completed_dates.contains(&date) })
        .collect();

    HabitOverview {
        id: habit.id,
        name: habit.name.clone(),
        description: habit.description.clone(),
        category_id: habit.category_id,
        tag_ids: sorted_tags(tag_sets, habit.id),
        tracking_days: window,
        archived: habit.archived,
        streaks: streak_summary,
        completed: stats.completed,
        total: stats.total,
        percentage: stats.percentage,
        days,
    }
}

pub fn get_habit(conn: &Connection, user_id: i64, habit_id: i64) -> Result<HabitResponse, AppError> {
    let habit = owned_habit(conn, habit_id, user_id)?;
    habit_response(conn, habit)
}

pub fn create_habit(
    conn: &Connection,
    user_id: i64,
    request: &CreateHabitRequest,
) -> Result<HabitResponse, AppError> {
    require_user(conn, user_id)?;
    let name = validate_habit_name(&request.name)?;
    if let Some(days) = request.tracking_days {
        validate_tracking_days(days)?;
    }
    if let Some(category_id) = request.category_id {
        owned_category(conn, category_id, user_id)?;
    }

    let tag_ids: HashSet<i64> = request.tag_ids.iter().copied().collect();
    validate_tag_count(tag_ids.len())?;
    for &tag_id in &tag_ids {
        owned_tag(conn, tag_id, user_id)?;
    }

    let habit = Habit::create(
        conn,
        user_id,
        name,
        request.description.as_deref(),
        request.category_id,
        request.tracking_days,
    )?;
    for &tag_id in &tag_ids {
        HabitTag::attach(conn, habit.id, tag_id)?;
    }

    log::debug!("Created habit {} for user {}", habit.id, user_id);
    habit_response(conn, habit)
}

pub fn update_habit(
    conn: &Connection,
    user_id: i64,
    habit_id: i64,
    request: &UpdateHabitRequest,
) -> Result<HabitResponse, AppError> {
    let habit = owned_habit(conn, habit_id, user_id)?;
    let name = validate_habit_name(&request.name)?;
    if let Some(days) = request.tracking_days {
        validate_tracking_days(days)?;
    }
    if let Some(category_id) = request.category_id {
        owned_category(conn, category_id, user_id)?;
    }

    Habit::update(
        conn,
        habit.id,
        name,
        request.description.as_deref(),
        request.category_id,
        request.tracking_days,
    )?;

    let updated = owned_habit(conn, habit_id, user_id)?;
    habit_response(conn, updated)
}

/// Archive or restore a habit. Archived habits drop out of listings and
/// analytics but keep their history.
pub fn set_archived(
    conn: &Connection,
    user_id: i64,
    habit_id: i64,
    archived: bool,
) -> Result<bool, AppError> {
    owned_habit(conn, habit_id, user_id)?;
    Ok(Habit::set_archived(conn, habit_id, archived)?)
}

/// Delete a habit along with its logs and comments.
pub fn delete_habit(conn: &Connection, user_id: i64, habit_id: i64) -> Result<bool, AppError> {
    owned_habit(conn, habit_id, user_id)?;
    let deleted = Habit::delete(conn, habit_id)?;
    if deleted {
        log::debug!("Deleted habit {} for user {}", habit_id, user_id);
    }
    Ok(deleted)
}

/// Flip completion for a habit on a date (default: today, UTC). The
/// upsert underneath makes a double toggle land back on the original
/// state.
pub fn toggle_completion(
    conn: &Connection,
    user_id: i64,
    habit_id: i64,
    date: Option<NaiveDate>,
) -> Result<ToggleResponse, AppError> {
    owned_habit(conn, habit_id, user_id)?;
    let date = date.unwrap_or_else(|| Utc::now().date_naive());
    let completed = HabitLog::toggle(conn, habit_id, date)?;
    Ok(ToggleResponse { habit_id, date, completed })
}

/// Attach a tag to a habit, holding the per-habit tag cap.
pub fn attach_tag(
    conn: &Connection,
    user_id: i64,
    habit_id: i64,
    tag_id: i64,
) -> Result<bool, AppError> {
    owned_habit(conn, habit_id, user_id)?;
    owned_tag(conn, tag_id, user_id)?;

    let attached = HabitTag::tag_ids_for_habit(conn, habit_id)?;
    if attached.contains(&tag_id) {
        return Ok(false);
    }
    validate_tag_count(attached.len() + 1)?;
    Ok(HabitTag::attach(conn, habit_id, tag_id)?)
}

pub fn detach_tag(
    conn: &Connection,
    user_id: i64,
    habit_id: i64,
    tag_id: i64,
) -> Result<bool, AppError> {
    owned_habit(conn, habit_id, user_id)?;
    owned_tag(conn, tag_id, user_id)?;
    Ok(HabitTag::detach(conn, habit_id, tag_id)?)
}

fn habit_response(conn: &Connection, habit: Habit) -> Result<HabitResponse, AppError> {
    let mut tag_ids: Vec<i64> = HabitTag::tag_ids_for_habit(conn, habit.id)?
        .into_iter()
        .collect();
    tag_ids.sort_unstable();

    Ok(HabitResponse {
        id: habit.id,
        name: habit.name,
        description: habit.description,
        category_id: habit.category_id,
        tag_ids,
        tracking_days: habit.tracking_days,
        archived: habit.archived,
        created_at: habit.created_at,
    })
}

fn sorted_tags(tag_sets: &HashMap<i64, HashSet<i64>>, habit_id: i64) -> Vec<i64> {
    let mut ids: Vec<i64> = tag_sets
        .get(&habit_id)
        .map(|set| set.iter().copied().collect())
        .unwrap_or_default();
    ids.sort_unstable();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tag;
    use crate::test_utils::{seed_user, setup_test_db};
    use chrono::Duration;

    fn create(conn: &Connection, user_id: i64, name: &str) -> HabitResponse {
        create_habit(
            conn,
            user_id,
            &CreateHabitRequest { name: name.to_string(), ..CreateHabitRequest::default() },
        )
        .unwrap()
    }

    #[test]
    fn test_create_rejects_bad_window() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let user_id = seed_user(conn);

        let request = CreateHabitRequest {
            name: "Run".to_string(),
            tracking_days: Some(31),
            ..CreateHabitRequest::default()
        };
        assert!(matches!(
            create_habit(conn, user_id, &request),
            Err(AppError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_create_rejects_foreign_category() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let owner = seed_user(conn);
        let stranger = seed_user(conn);
        let category =
            crate::models::Category::create(conn, owner, "Health", "#22c55e", None).unwrap();

        let request = CreateHabitRequest {
            name: "Run".to_string(),
            category_id: Some(category.id),
            ..CreateHabitRequest::default()
        };
        assert!(matches!(
            create_habit(conn, stranger, &request),
            Err(AppError::NotAuthorized { .. })
        ));
    }

    #[test]
    fn test_create_enforces_tag_cap() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let user_id = seed_user(conn);

        let tag_ids: Vec<i64> = (0..6)
            .map(|n| Tag::create(conn, user_id, &format!("tag{n}")).unwrap().id)
            .collect();

        let request = CreateHabitRequest {
            name: "Run".to_string(),
            tag_ids,
            ..CreateHabitRequest::default()
        };
        assert!(matches!(
            create_habit(conn, user_id, &request),
            Err(AppError::InvalidInput { field: "tags", .. })
        ));
    }

    #[test]
    fn test_toggle_requires_ownership() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let owner = seed_user(conn);
        let stranger = seed_user(conn);
        let habit = create(conn, owner, "Run");

        assert!(matches!(
            toggle_completion(conn, stranger, habit.id, None),
            Err(AppError::NotAuthorized { .. })
        ));
        assert!(matches!(
            toggle_completion(conn, owner, 99999, None),
            Err(AppError::NotFound { .. })
        ));
    }

    #[test]
    fn test_toggle_twice_is_idempotent() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let user_id = seed_user(conn);
        let habit = create(conn, user_id, "Run");
        let date = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();

        let first = toggle_completion(conn, user_id, habit.id, Some(date)).unwrap();
        assert!(first.completed);
        let second = toggle_completion(conn, user_id, habit.id, Some(date)).unwrap();
        assert!(!second.completed);
    }

    #[test]
    fn test_list_habits_scenario() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let user_id = seed_user(conn);
        let habit = create(conn, user_id, "Run");

        // Completions on the last three days, nothing today
        let today = Utc::now().date_naive();
        for n in 1..=3 {
            toggle_completion(conn, user_id, habit.id, Some(today - Duration::days(n))).unwrap();
        }

        let overviews = list_habits(conn, user_id, &HabitQuery::default()).unwrap();
        assert_eq!(overviews.len(), 1);
        let overview = &overviews[0];
        assert_eq!(overview.streaks.current, 3);
        assert_eq!(overview.streaks.best, 3);
        assert_eq!(overview.tracking_days, 7);
        assert_eq!(overview.completed, 3);
        assert_eq!(overview.days.len(), 7);
        assert!(!overview.days[6].completed);
        assert!(overview.days[5].completed);
    }

    #[test]
    fn test_list_habits_honors_habit_override() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let user_id = seed_user(conn);
        create_habit(
            conn,
            user_id,
            &CreateHabitRequest {
                name: "Run".to_string(),
                tracking_days: Some(14),
                ..CreateHabitRequest::default()
            },
        )
        .unwrap();

        let overviews = list_habits(conn, user_id, &HabitQuery::default()).unwrap();
        assert_eq!(overviews[0].tracking_days, 14);

        // An explicit request window beats the override
        let query = HabitQuery { tracking_days: Some(3), ..HabitQuery::default() };
        let overviews = list_habits(conn, user_id, &query).unwrap();
        assert_eq!(overviews[0].tracking_days, 3);
    }

    #[test]
    fn test_list_habits_filters_by_tag_superset() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let user_id = seed_user(conn);
        let a = Tag::create(conn, user_id, "a").unwrap();
        let b = Tag::create(conn, user_id, "b").unwrap();

        let both = create(conn, user_id, "Both");
        attach_tag(conn, user_id, both.id, a.id).unwrap();
        attach_tag(conn, user_id, both.id, b.id).unwrap();

        let only_a = create(conn, user_id, "OnlyA");
        attach_tag(conn, user_id, only_a.id, a.id).unwrap();

        let query = HabitQuery { tag_ids: vec![a.id, b.id], ..HabitQuery::default() };
        let overviews = list_habits(conn, user_id, &query).unwrap();
        assert_eq!(overviews.len(), 1);
        assert_eq!(overviews[0].id, both.id);
    }

    #[test]
    fn test_list_rejects_invalid_window() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let user_id = seed_user(conn);

        for days in [0, 31] {
            let query = HabitQuery { tracking_days: Some(days), ..HabitQuery::default() };
            assert!(matches!(
                list_habits(conn, user_id, &query),
                Err(AppError::OutOfRange { .. })
            ));
        }
        for days in [1, 30] {
            let query = HabitQuery { tracking_days: Some(days), ..HabitQuery::default() };
            assert!(list_habits(conn, user_id, &query).is_ok());
        }
    }

    #[test]
    fn test_attach_tag_cap_and_idempotence() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let user_id = seed_user(conn);
        let habit = create(conn, user_id, "Run");

        for n in 0..5 {
            let tag = Tag::create(conn, user_id, &format!("tag{n}")).unwrap();
            assert!(attach_tag(conn, user_id, habit.id, tag.id).unwrap());
        }

        // Re-attaching an existing tag is a quiet no-op
        let existing = Tag::find_for_user(conn, user_id).unwrap()[0].id;
        assert!(!attach_tag(conn, user_id, habit.id, existing).unwrap());

        // A sixth distinct tag breaches the cap
        let sixth = Tag::create(conn, user_id, "tag5").unwrap();
        assert!(attach_tag(conn, user_id, habit.id, sixth.id).is_err());
    }

    #[test]
    fn test_update_and_archive() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let user_id = seed_user(conn);
        let habit = create(conn, user_id, "Run");

        let request = UpdateHabitRequest {
            name: "Run far".to_string(),
            description: Some("5k minimum".to_string()),
            category_id: None,
            tracking_days: Some(21),
        };
        let updated = update_habit(conn, user_id, habit.id, &request).unwrap();
        assert_eq!(updated.name, "Run far");
        assert_eq!(updated.tracking_days, Some(21));

        assert!(set_archived(conn, user_id, habit.id, true).unwrap());
        let listed = list_habits(conn, user_id, &HabitQuery::default()).unwrap();
        assert!(listed.is_empty());

        let all = HabitQuery { include_archived: true, ..HabitQuery::default() };
        assert_eq!(list_habits(conn, user_id, &all).unwrap().len(), 1);
    }
}
