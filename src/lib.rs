pub mod analytics;
pub mod api;
pub mod constants;
pub mod db;
pub mod error;
pub mod filter;
pub mod models;
#[cfg(test)]
mod test_utils;
pub mod validation;

pub use error::AppError;
pub use filter::HabitFilter;

use crate::api::{HabitOverview, HabitStatisticsResponse, HeatmapResponse, RollupResponse, ToggleResponse, UserOverviewResponse, UserSettingsResponse};
use crate::api::analytics::AnalyticsQuery;
use crate::api::habits::HabitQuery;
use crate::db::{migrations, with_connection, Database};
use chrono::NaiveDate;
use directories::ProjectDirs;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Error type for tracker initialization failures
#[derive(Debug, Error)]
pub enum InitError {
    #[error("could not determine a data directory")]
    NoProjectDirs,
    #[error("could not create data directory: {0}")]
    DataDirCreation(#[from] std::io::Error),
    #[error("failed to open database: {0}")]
    DatabaseOpen(rusqlite::Error),
    #[error("failed to run database migrations: {0}")]
    Migration(rusqlite::Error),
}

fn default_db_path() -> Result<PathBuf, InitError> {
    let proj_dirs = ProjectDirs::from("com", "stride", "Stride")
        .ok_or(InitError::NoProjectDirs)?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("stride.db"))
}

/// Shared handle over the habit store. The embedding service keeps one
/// of these and calls the flows below (or drops down to the `api`
/// module through [`Tracker::with_db`]). The connection sits behind a
/// mutex so request handlers on different threads can share it.
pub struct Tracker {
    db: Arc<Mutex<Database>>,
}

impl Tracker {
    /// Open (or create) the database at `path` and bring the schema up
    /// to date.
    pub fn open(path: &Path) -> Result<Self, InitError> {
        let db = Database::open(path).map_err(InitError::DatabaseOpen)?;
        migrations::run(db.connection()).map_err(InitError::Migration)?;
        log::info!("Habit store opened at {}", path.display());
        Ok(Self { db: Arc::new(Mutex::new(db)) })
    }

    /// Open the database at the platform's data directory.
    pub fn open_default() -> Result<Self, InitError> {
        Self::open(&default_db_path()?)
    }

    /// Run an operation against the shared connection. This is the
    /// doorway to everything in the `api` module that has no dedicated
    /// method here.
    pub fn with_db<T, F>(&self, operation: &str, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&Connection) -> Result<T, AppError>,
    {
        with_connection(&self.db, operation, f)
    }

    pub fn create_user(&self, email: &str, name: Option<&str>) -> Result<UserSettingsResponse, AppError> {
        self.with_db("create user", |conn| {
            let user = models::User::create(conn, email, name)?;
            Ok(UserSettingsResponse::from(user))
        })
    }

    /// The dashboard listing: habits in scope with streaks, stats, and
    /// day cells.
    pub fn dashboard(&self, user_id: i64, query: &HabitQuery) -> Result<Vec<HabitOverview>, AppError> {
        self.with_db("load dashboard", |conn| api::habits::list_habits(conn, user_id, query))
    }

    /// Flip completion for a habit on a date (default: today).
    pub fn toggle(
        &self,
        user_id: i64,
        habit_id: i64,
        date: Option<NaiveDate>,
    ) -> Result<ToggleResponse, AppError> {
        self.with_db("toggle completion", |conn| {
            api::habits::toggle_completion(conn, user_id, habit_id, date)
        })
    }

    pub fn habit_statistics(
        &self,
        user_id: i64,
        habit_id: i64,
        tracking_days: Option<i64>,
    ) -> Result<HabitStatisticsResponse, AppError> {
        self.with_db("load habit statistics", |conn| {
            api::analytics::habit_statistics(conn, user_id, habit_id, tracking_days, None)
        })
    }

    pub fn heatmap(&self, user_id: i64, query: &AnalyticsQuery) -> Result<HeatmapResponse, AppError> {
        self.with_db("load heatmap", |conn| api::analytics::heatmap(conn, user_id, query))
    }

    pub fn category_rollup(
        &self,
        user_id: i64,
        category_id: i64,
        tracking_days: Option<i64>,
    ) -> Result<RollupResponse, AppError> {
        self.with_db("load category rollup", |conn| {
            api::analytics::category_rollup(conn, user_id, category_id, tracking_days, None)
        })
    }

    pub fn tag_rollup(
        &self,
        user_id: i64,
        tag_id: i64,
        tracking_days: Option<i64>,
    ) -> Result<RollupResponse, AppError> {
        self.with_db("load tag rollup", |conn| {
            api::analytics::tag_rollup(conn, user_id, tag_id, tracking_days, None)
        })
    }

    pub fn user_overview(
        &self,
        user_id: i64,
        tracking_days: Option<i64>,
    ) -> Result<UserOverviewResponse, AppError> {
        self.with_db("load user overview", |conn| {
            api::analytics::user_overview(conn, user_id, tracking_days, None)
        })
    }
}
