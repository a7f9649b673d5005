// src/api/mod.rs
//
// Operations layer: typed entry points the surrounding service calls
// with already-parsed parameters. Each operation validates input,
// checks ownership, runs model SQL and the pure engines, and returns a
// DTO.

mod dtos;
pub mod analytics;
pub mod categories;
pub mod comments;
pub mod habits;
pub mod tags;
pub mod users;

pub use dtos::*;

use crate::error::AppError;
use crate::models::{Category, Comment, Habit, HabitLog, Tag, User};
use rusqlite::Connection;

/// Look up a user or report NotFound.
pub(crate) fn require_user(conn: &Connection, user_id: i64) -> Result<User, AppError> {
    User::find_by_id(conn, user_id)?.ok_or(AppError::NotFound { entity: "user" })
}

/// Look up a habit and verify the requester owns it.
pub(crate) fn owned_habit(
    conn: &Connection,
    habit_id: i64,
    user_id: i64,
) -> Result<Habit, AppError> {
    let habit =
        Habit::find_by_id(conn, habit_id)?.ok_or(AppError::NotFound { entity: "habit" })?;
    if habit.user_id != user_id {
        return Err(AppError::NotAuthorized { entity: "habit" });
    }
    Ok(habit)
}

/// Look up a category and verify the requester owns it.
pub(crate) fn owned_category(
    conn: &Connection,
    category_id: i64,
    user_id: i64,
) -> Result<Category, AppError> {
    let category = Category::find_by_id(conn, category_id)?
        .ok_or(AppError::NotFound { entity: "category" })?;
    if category.user_id != user_id {
        return Err(AppError::NotAuthorized { entity: "category" });
    }
    Ok(category)
}

/// Look up a tag and verify the requester owns it.
pub(crate) fn owned_tag(conn: &Connection, tag_id: i64, user_id: i64) -> Result<Tag, AppError> {
    let tag = Tag::find_by_id(conn, tag_id)?.ok_or(AppError::NotFound { entity: "tag" })?;
    if tag.user_id != user_id {
        return Err(AppError::NotAuthorized { entity: "tag" });
    }
    Ok(tag)
}

/// Look up a completion log and verify its habit belongs to the
/// requester. Returns the log together with its habit.
pub(crate) fn owned_log(
    conn: &Connection,
    log_id: i64,
    user_id: i64,
) -> Result<(HabitLog, Habit), AppError> {
    let log = HabitLog::find_by_id(conn, log_id)?.ok_or(AppError::NotFound { entity: "log" })?;
    let habit = owned_habit(conn, log.habit_id, user_id)?;
    Ok((log, habit))
}

/// Look up a comment and verify its habit belongs to the requester.
pub(crate) fn owned_comment(
    conn: &Connection,
    comment_id: i64,
    user_id: i64,
) -> Result<Comment, AppError> {
    let comment =
        Comment::find_by_id(conn, comment_id)?.ok_or(AppError::NotFound { entity: "comment" })?;
    owned_habit(conn, comment.habit_id, user_id)?;
    Ok(comment)
}
