use crate::error::AppError;
use crate::models::Comment;
use crate::validation::validate_comment_text;
use rusqlite::Connection;

use super::{owned_comment, owned_log, CommentResponse};

/// Comments on one day's log, oldest first.
pub fn list_comments(
    conn: &Connection,
    user_id: i64,
    log_id: i64,
) -> Result<Vec<CommentResponse>, AppError> {
    owned_log(conn, log_id, user_id)?;
    let comments = Comment::find_for_log(conn, log_id)?;
    Ok(comments.into_iter().map(CommentResponse::from).collect())
}

pub fn add_comment(
    conn: &Connection,
    user_id: i64,
    log_id: i64,
    text: &str,
) -> Result<CommentResponse, AppError> {
    let (log, habit) = owned_log(conn, log_id, user_id)?;
    let text = validate_comment_text(text)?;

    let comment = Comment::create(conn, habit.id, log.id, text)?;
    Ok(CommentResponse::from(comment))
}

pub fn update_comment(
    conn: &Connection,
    user_id: i64,
    comment_id: i64,
    text: &str,
) -> Result<CommentResponse, AppError> {
    owned_comment(conn, comment_id, user_id)?;
    let text = validate_comment_text(text)?;

    Comment::update_text(conn, comment_id, text)?;
    let comment = owned_comment(conn, comment_id, user_id)?;
    Ok(CommentResponse::from(comment))
}

pub fn delete_comment(
    conn: &Connection,
    user_id: i64,
    comment_id: i64,
) -> Result<bool, AppError> {
    owned_comment(conn, comment_id, user_id)?;
    Ok(Comment::delete(conn, comment_id)?)
}
