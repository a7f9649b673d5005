use crate::constants::DEFAULT_CATEGORY_COLOR;
use crate::error::{is_unique_violation, AppError};
use crate::models::Category;
use crate::validation::{validate_category_name, validate_color};
use rusqlite::Connection;

use super::{owned_category, require_user, CategoryResponse};

pub fn list_categories(conn: &Connection, user_id: i64) -> Result<Vec<CategoryResponse>, AppError> {
    require_user(conn, user_id)?;
    Category::find_for_user(conn, user_id)?
        .into_iter()
        .map(|category| {
            let count = Category::habit_count(conn, category.id)?;
            Ok(CategoryResponse::new(category, count))
        })
        .collect()
}

pub fn create_category(
    conn: &Connection,
    user_id: i64,
    name: &str,
    color: Option<&str>,
    icon: Option<&str>,
) -> Result<CategoryResponse, AppError> {
    require_user(conn, user_id)?;
    let name = validate_category_name(name)?;
    let color = validate_color(color.unwrap_or(DEFAULT_CATEGORY_COLOR))?;

    let category = Category::create(conn, user_id, name, color, icon).map_err(|e| {
        if is_unique_violation(&e) {
            AppError::AlreadyExists { name: name.to_string() }
        } else {
            AppError::Database(e)
        }
    })?;

    Ok(CategoryResponse::new(category, 0))
}

pub fn update_category(
    conn: &Connection,
    user_id: i64,
    category_id: i64,
    name: &str,
    color: &str,
    icon: Option<&str>,
) -> Result<CategoryResponse, AppError> {
    owned_category(conn, category_id, user_id)?;
    let name = validate_category_name(name)?;
    let color = validate_color(color)?;

    Category::update(conn, category_id, name, color, icon).map_err(|e| {
        if is_unique_violation(&e) {
            AppError::AlreadyExists { name: name.to_string() }
        } else {
            AppError::Database(e)
        }
    })?;

    let category = owned_category(conn, category_id, user_id)?;
    let count = Category::habit_count(conn, category.id)?;
    Ok(CategoryResponse::new(category, count))
}

/// Delete a category. Member habits are detached, not deleted.
pub fn delete_category(
    conn: &Connection,
    user_id: i64,
    category_id: i64,
) -> Result<bool, AppError> {
    owned_category(conn, category_id, user_id)?;
    Ok(Category::delete(conn, category_id)?)
}
