use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::ToSql;
use rusqlite::{Connection, Result, params};

/// One calendar day of completion state for one habit. The
/// `UNIQUE (habit_id, date)` constraint makes this the atomic unit the
/// analytics read: at most one row per habit per day.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitLog {
    pub id: i64,
    pub habit_id: i64,
    pub date: NaiveDate,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl HabitLog {
    /// Flip the completion state for a habit on a date. A missing row is
    /// created as completed; an existing row has its flag inverted. The
    /// upsert rides the unique constraint, so two concurrent toggles
    /// serialize at the storage layer instead of duplicating rows.
    ///
    /// Returns the resulting completion state.
    pub fn toggle(conn: &Connection, habit_id: i64, date: NaiveDate) -> Result<bool> {
        conn.execute(
            "INSERT INTO habit_logs (habit_id, date, completed, created_at)
             VALUES (?1, ?2, 1, ?3)
             ON CONFLICT (habit_id, date) DO UPDATE SET completed = 1 - completed",
            params![habit_id, date, Utc::now()],
        )?;
        conn.query_row(
            "SELECT completed FROM habit_logs WHERE habit_id = ?1 AND date = ?2",
            params![habit_id, date],
            |row| Ok(row.get::<_, i32>(0)? != 0),
        )
    }

    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, habit_id, date, completed, created_at
             FROM habit_logs WHERE id = ?1",
        )?;
        let mut rows = stmt.query(params![id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(Self::from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn find_by_date(
        conn: &Connection,
        habit_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, habit_id, date, completed, created_at
             FROM habit_logs WHERE habit_id = ?1 AND date = ?2",
        )?;
        let mut rows = stmt.query(params![habit_id, date])?;

        if let Some(row) = rows.next()? {
            Ok(Some(Self::from_row(row)?))
        } else {
            Ok(None)
        }
    }

    /// Full completion history for one habit, oldest first.
    pub fn find_for_habit(conn: &Connection, habit_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, habit_id, date, completed, created_at
             FROM habit_logs WHERE habit_id = ?1 ORDER BY date",
        )?;
        let rows = stmt.query_map(params![habit_id], |row| Self::from_row(row))?;
        rows.collect()
    }

    /// Logs for one habit within [start, end], inclusive on both ends.
    pub fn find_in_window(
        conn: &Connection,
        habit_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, habit_id, date, completed, created_at
             FROM habit_logs
             WHERE habit_id = ?1 AND date >= ?2 AND date <= ?3
             ORDER BY date",
        )?;
        let rows = stmt.query_map(params![habit_id, start, end], |row| Self::from_row(row))?;
        rows.collect()
    }

    /// Logs for a set of habits within [start, end]. Used by the heatmap,
    /// which reads a whole filtered habit set in one pass.
    pub fn find_for_habits_in_window(
        conn: &Connection,
        habit_ids: &[i64],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Self>> {
        if habit_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders: Vec<String> = (1..=habit_ids.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "SELECT id, habit_id, date, completed, created_at
             FROM habit_logs
             WHERE habit_id IN ({}) AND date >= ?{} AND date <= ?{}
             ORDER BY date",
            placeholders.join(", "),
            habit_ids.len() + 1,
            habit_ids.len() + 2,
        );

        let mut values: Vec<&dyn ToSql> = habit_ids.iter().map(|id| id as &dyn ToSql).collect();
        values.push(&start);
        values.push(&end);

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(values.as_slice(), |row| Self::from_row(row))?;
        rows.collect()
    }

    /// Lifetime count of completed days for one habit.
    pub fn total_completions(conn: &Connection, habit_id: i64) -> Result<i64> {
        conn.query_row(
            "SELECT COUNT(*) FROM habit_logs WHERE habit_id = ?1 AND completed = 1",
            params![habit_id],
            |row| row.get(0),
        )
    }

    /// Most recent completed date, if any.
    pub fn last_completed_date(conn: &Connection, habit_id: i64) -> Result<Option<NaiveDate>> {
        let mut stmt = conn.prepare(
            "SELECT date FROM habit_logs
             WHERE habit_id = ?1 AND completed = 1
             ORDER BY date DESC LIMIT 1",
        )?;
        let mut rows = stmt.query(params![habit_id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    fn from_row(row: &rusqlite::Row<'_>) -> Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            habit_id: row.get(1)?,
            date: row.get(2)?,
            completed: row.get::<_, i32>(3)? != 0,
            created_at: row.get(4)?,
        })
    }
}
