use rusqlite::{Connection, Result, params};
use std::collections::{HashMap, HashSet};

/// One row of the habit↔tag association. Neither `Habit` nor `Tag`
/// holds a back-reference; everything here is a derived lookup over
/// this table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitTag {
    pub habit_id: i64,
    pub tag_id: i64,
}

impl HabitTag {
    /// Attach a tag to a habit. Attaching an already-attached tag is a
    /// no-op and reports false.
    pub fn attach(conn: &Connection, habit_id: i64, tag_id: i64) -> Result<bool> {
        let rows_affected = conn.execute(
            "INSERT OR IGNORE INTO habit_tags (habit_id, tag_id) VALUES (?1, ?2)",
            params![habit_id, tag_id],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn detach(conn: &Connection, habit_id: i64, tag_id: i64) -> Result<bool> {
        let rows_affected = conn.execute(
            "DELETE FROM habit_tags WHERE habit_id = ?1 AND tag_id = ?2",
            params![habit_id, tag_id],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn count_for_habit(conn: &Connection, habit_id: i64) -> Result<usize> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM habit_tags WHERE habit_id = ?1",
            params![habit_id],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    pub fn tag_ids_for_habit(conn: &Connection, habit_id: i64) -> Result<HashSet<i64>> {
        let mut stmt =
            conn.prepare("SELECT tag_id FROM habit_tags WHERE habit_id = ?1")?;
        let rows = stmt.query_map(params![habit_id], |row| row.get(0))?;
        rows.collect()
    }

    /// Tag sets for every habit a user owns, keyed by habit id. Habits
    /// without tags are absent from the map.
    pub fn tag_sets_for_user(
        conn: &Connection,
        user_id: i64,
    ) -> Result<HashMap<i64, HashSet<i64>>> {
        let mut stmt = conn.prepare(
            "SELECT ht.habit_id, ht.tag_id
             FROM habit_tags ht
             JOIN habits h ON h.id = ht.habit_id
             WHERE h.user_id = ?1",
        )?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut sets: HashMap<i64, HashSet<i64>> = HashMap::new();
        for row in rows {
            let (habit_id, tag_id) = row?;
            sets.entry(habit_id).or_default().insert(tag_id);
        }
        Ok(sets)
    }
}
