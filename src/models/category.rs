use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, params};

/// A user-defined grouping for habits. A habit belongs to at most one
/// category; deleting a category detaches its habits instead of removing
/// them (the FK is ON DELETE SET NULL).
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    /// Display color as hex RGB, e.g. "#6366f1".
    pub color: String,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn create(
        conn: &Connection,
        user_id: i64,
        name: &str,
        color: &str,
        icon: Option<&str>,
    ) -> Result<Self> {
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO categories (user_id, name, color, icon, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![user_id, name, color, icon, created_at],
        )?;
        Ok(Self {
            id: conn.last_insert_rowid(),
            user_id,
            name: name.to_string(),
            color: color.to_string(),
            icon: icon.map(|s| s.to_string()),
            created_at,
        })
    }

    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, color, icon, created_at
             FROM categories WHERE id = ?1",
        )?;
        let mut rows = stmt.query(params![id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(Self::from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn find_for_user(conn: &Connection, user_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, color, icon, created_at
             FROM categories WHERE user_id = ?1 ORDER BY name",
        )?;
        let rows = stmt.query_map(params![user_id], |row| Self::from_row(row))?;
        rows.collect()
    }

    pub fn update(
        conn: &Connection,
        id: i64,
        name: &str,
        color: &str,
        icon: Option<&str>,
    ) -> Result<bool> {
        let rows_affected = conn.execute(
            "UPDATE categories SET name = ?1, color = ?2, icon = ?3 WHERE id = ?4",
            params![name, color, icon, id],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a category. Habits referencing it revert to uncategorized
    /// via the SET NULL foreign key.
    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        let rows_affected = conn.execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        Ok(rows_affected > 0)
    }

    pub fn habit_count(conn: &Connection, id: i64) -> Result<i64> {
        conn.query_row(
            "SELECT COUNT(*) FROM habits WHERE category_id = ?1",
            params![id],
            |row| row.get(0),
        )
    }

    fn from_row(row: &rusqlite::Row<'_>) -> Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            color: row.get(3)?,
            icon: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}
