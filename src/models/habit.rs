use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, params};

/// A habit being tracked. Completion history lives in `habit_logs`;
/// deleting a habit cascades its logs and comments away.
#[derive(Debug, Clone, PartialEq)]
pub struct Habit {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    /// Per-habit tracking window override in days; None falls back to
    /// the owner's default.
    pub tracking_days: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub archived: bool,
}

impl Habit {
    pub fn create(
        conn: &Connection,
        user_id: i64,
        name: &str,
        description: Option<&str>,
        category_id: Option<i64>,
        tracking_days: Option<i64>,
    ) -> Result<Self> {
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO habits (user_id, name, description, category_id, tracking_days, created_at, archived)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0)",
            params![user_id, name, description, category_id, tracking_days, created_at],
        )?;
        Ok(Self {
            id: conn.last_insert_rowid(),
            user_id,
            name: name.to_string(),
            description: description.map(|s| s.to_string()),
            category_id,
            tracking_days,
            created_at,
            archived: false,
        })
    }

    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, description, category_id, tracking_days, created_at, archived
             FROM habits WHERE id = ?1",
        )?;
        let mut rows = stmt.query(params![id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(Self::from_row(row)?))
        } else {
            Ok(None)
        }
    }

    /// All habits owned by a user, newest first. Archived habits are
    /// included only on request.
    pub fn find_for_user(
        conn: &Connection,
        user_id: i64,
        include_archived: bool,
    ) -> Result<Vec<Self>> {
        let sql = if include_archived {
            "SELECT id, user_id, name, description, category_id, tracking_days, created_at, archived
             FROM habits WHERE user_id = ?1 ORDER BY created_at DESC, id DESC"
        } else {
            "SELECT id, user_id, name, description, category_id, tracking_days, created_at, archived
             FROM habits WHERE user_id = ?1 AND archived = 0 ORDER BY created_at DESC, id DESC"
        };
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params![user_id], |row| Self::from_row(row))?;
        rows.collect()
    }

    pub fn update(
        conn: &Connection,
        id: i64,
        name: &str,
        description: Option<&str>,
        category_id: Option<i64>,
        tracking_days: Option<i64>,
    ) -> Result<bool> {
        let rows_affected = conn.execute(
            "UPDATE habits SET name = ?1, description = ?2, category_id = ?3, tracking_days = ?4
             WHERE id = ?5",
            params![name, description, category_id, tracking_days, id],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn set_archived(conn: &Connection, id: i64, archived: bool) -> Result<bool> {
        let rows_affected = conn.execute(
            "UPDATE habits SET archived = ?1 WHERE id = ?2",
            params![archived as i32, id],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a habit. Logs, comments, and tag associations cascade away.
    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        let rows_affected = conn.execute("DELETE FROM habits WHERE id = ?1", params![id])?;
        Ok(rows_affected > 0)
    }

    fn from_row(row: &rusqlite::Row<'_>) -> Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            category_id: row.get(4)?,
            tracking_days: row.get(5)?,
            created_at: row.get(6)?,
            archived: row.get::<_, i32>(7)? != 0,
        })
    }
}
