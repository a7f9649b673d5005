// src/api/dtos.rs

use crate::analytics::{HeatmapDay, Rollup, StreakSummary};
use crate::models::{Category, Comment, Tag, User};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct HabitResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub tag_ids: Vec<i64>,
    pub tracking_days: Option<i64>,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
}

/// One day cell in a habit's dashboard row.
#[derive(Debug, Serialize)]
pub struct DayStatus {
    pub date: NaiveDate,
    pub completed: bool,
}

/// A habit as the dashboard shows it: identity plus windowed
/// consistency numbers.
#[derive(Debug, Serialize)]
pub struct HabitOverview {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub tag_ids: Vec<i64>,
    /// Effective window used for `stats` and `days` after policy
    /// resolution (request, then habit override, then user default).
    pub tracking_days: u32,
    pub archived: bool,
    pub streaks: StreakSummary,
    pub completed: u32,
    pub total: u32,
    pub percentage: f64,
    pub days: Vec<DayStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateHabitRequest {
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub tracking_days: Option<i64>,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateHabitRequest {
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub tracking_days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub habit_id: i64,
    pub date: NaiveDate,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct HabitStatisticsResponse {
    pub habit_id: i64,
    pub habit_name: String,
    pub tracking_days: u32,
    pub completed: u32,
    pub total: u32,
    pub percentage: f64,
    pub current_streak: u32,
    pub best_streak: u32,
    pub total_completions: i64,
    pub last_completion_date: Option<NaiveDate>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub icon: Option<String>,
    pub habit_count: i64,
}

impl CategoryResponse {
    pub fn new(category: Category, habit_count: i64) -> Self {
        Self {
            id: category.id,
            name: category.name,
            color: category.color,
            icon: category.icon,
            habit_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self { id: tag.id, name: tag.name }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub habit_id: i64,
    pub habit_log_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_edited: bool,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        let is_edited = comment.updated_at != comment.created_at;
        Self {
            id: comment.id,
            habit_id: comment.habit_id,
            habit_log_id: comment.habit_log_id,
            text: comment.text,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            is_edited,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserSettingsResponse {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub default_tracking_days: i64,
}

impl From<User> for UserSettingsResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            default_tracking_days: user.default_tracking_days,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HeatmapResponse {
    pub tracking_days: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_habits: u32,
    pub days: Vec<HeatmapDay>,
}

#[derive(Debug, Serialize)]
pub struct RollupResponse {
    /// Category or tag id, depending on which rollup produced this.
    pub group_id: i64,
    pub group_name: String,
    pub tracking_days: u32,
    pub habit_count: usize,
    pub rollup: Rollup,
}

#[derive(Debug, Serialize)]
pub struct UserOverviewResponse {
    pub user_id: i64,
    pub tracking_days: u32,
    pub total_habits: usize,
    pub average_percentage: Option<f64>,
    pub categories: Vec<RollupResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{rollup, HeatmapDay};

    #[test]
    fn test_empty_rollup_serializes_average_as_null() {
        let response = RollupResponse {
            group_id: 1,
            group_name: "Health".to_string(),
            tracking_days: 7,
            habit_count: 0,
            rollup: rollup(Vec::new()),
        };

        let json = serde_json::to_value(&response).unwrap();
        // "no data" must reach the wire as null, not 0
        assert!(json["rollup"]["average_percentage"].is_null());
    }

    #[test]
    fn test_heatmap_day_field_names() {
        let day = HeatmapDay {
            date: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
            completed_count: 2,
            total_habits: 4,
            density: 0.5,
        };

        let json = serde_json::to_value(day).unwrap();
        assert_eq!(json["date"], "2026-08-07");
        assert_eq!(json["completed_count"], 2);
        assert_eq!(json["total_habits"], 4);
        assert_eq!(json["density"], 0.5);
    }
}
