use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, params};

/// A note attached to one day's completion log. Comments share the
/// log's lifecycle: deleting the log (or its habit) deletes them.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub habit_id: i64,
    pub habit_log_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn create(
        conn: &Connection,
        habit_id: i64,
        habit_log_id: i64,
        text: &str,
    ) -> Result<Self> {
        let now = Utc::now();
        conn.execute(
            "INSERT INTO comments (habit_id, habit_log_id, text, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![habit_id, habit_log_id, text, now, now],
        )?;
        Ok(Self {
            id: conn.last_insert_rowid(),
            habit_id,
            habit_log_id,
            text: text.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, habit_id, habit_log_id, text, created_at, updated_at
             FROM comments WHERE id = ?1",
        )?;
        let mut rows = stmt.query(params![id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(Self::from_row(row)?))
        } else {
            Ok(None)
        }
    }

    /// Comments on one log, oldest first.
    pub fn find_for_log(conn: &Connection, habit_log_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, habit_id, habit_log_id, text, created_at, updated_at
             FROM comments WHERE habit_log_id = ?1 ORDER BY created_at, id",
        )?;
        let rows = stmt.query_map(params![habit_log_id], |row| Self::from_row(row))?;
        rows.collect()
    }

    pub fn update_text(conn: &Connection, id: i64, text: &str) -> Result<bool> {
        let rows_affected = conn.execute(
            "UPDATE comments SET text = ?1, updated_at = ?2 WHERE id = ?3",
            params![text, Utc::now(), id],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        let rows_affected = conn.execute("DELETE FROM comments WHERE id = ?1", params![id])?;
        Ok(rows_affected > 0)
    }

    fn from_row(row: &rusqlite::Row<'_>) -> Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            habit_id: row.get(1)?,
            habit_log_id: row.get(2)?,
            text: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }
}
