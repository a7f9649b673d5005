use crate::error::{is_unique_violation, AppError};
use crate::models::Tag;
use crate::validation::normalize_tag_name;
use rusqlite::Connection;

use super::{owned_tag, require_user, TagResponse};

pub fn list_tags(conn: &Connection, user_id: i64) -> Result<Vec<TagResponse>, AppError> {
    require_user(conn, user_id)?;
    let tags = Tag::find_for_user(conn, user_id)?;
    Ok(tags.into_iter().map(TagResponse::from).collect())
}

pub fn create_tag(conn: &Connection, user_id: i64, name: &str) -> Result<TagResponse, AppError> {
    require_user(conn, user_id)?;
    let name = normalize_tag_name(name)?;

    let tag = Tag::create(conn, user_id, &name).map_err(|e| {
        if is_unique_violation(&e) {
            AppError::AlreadyExists { name: name.clone() }
        } else {
            AppError::Database(e)
        }
    })?;

    Ok(TagResponse::from(tag))
}

pub fn rename_tag(
    conn: &Connection,
    user_id: i64,
    tag_id: i64,
    name: &str,
) -> Result<TagResponse, AppError> {
    owned_tag(conn, tag_id, user_id)?;
    let name = normalize_tag_name(name)?;

    Tag::rename(conn, tag_id, &name).map_err(|e| {
        if is_unique_violation(&e) {
            AppError::AlreadyExists { name: name.clone() }
        } else {
            AppError::Database(e)
        }
    })?;

    let tag = owned_tag(conn, tag_id, user_id)?;
    Ok(TagResponse::from(tag))
}

/// Delete a tag. Habits that carried it keep everything else.
pub fn delete_tag(conn: &Connection, user_id: i64, tag_id: i64) -> Result<bool, AppError> {
    owned_tag(conn, tag_id, user_id)?;
    Ok(Tag::delete(conn, tag_id)?)
}
