use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, params};

/// A free-form label attached to habits through the `habit_tags`
/// association table. Names are stored lowercase; the api layer
/// normalizes before calling in.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Tag {
    pub fn create(conn: &Connection, user_id: i64, name: &str) -> Result<Self> {
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO tags (user_id, name, created_at) VALUES (?1, ?2, ?3)",
            params![user_id, name, created_at],
        )?;
        Ok(Self {
            id: conn.last_insert_rowid(),
            user_id,
            name: name.to_string(),
            created_at,
        })
    }

    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, created_at FROM tags WHERE id = ?1",
        )?;
        let mut rows = stmt.query(params![id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(Self {
                id: row.get(0)?,
                user_id: row.get(1)?,
                name: row.get(2)?,
                created_at: row.get(3)?,
            }))
        } else {
            Ok(None)
        }
    }

    pub fn find_for_user(conn: &Connection, user_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, created_at
             FROM tags WHERE user_id = ?1 ORDER BY name",
        )?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok(Self {
                id: row.get(0)?,
                user_id: row.get(1)?,
                name: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?;
        rows.collect()
    }

    pub fn rename(conn: &Connection, id: i64, name: &str) -> Result<bool> {
        let rows_affected = conn.execute(
            "UPDATE tags SET name = ?1 WHERE id = ?2",
            params![name, id],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a tag. Association rows cascade away; the habits that
    /// carried the tag are untouched.
    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        let rows_affected = conn.execute("DELETE FROM tags WHERE id = ?1", params![id])?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Habit, HabitTag};
    use crate::test_utils::{seed_user, setup_test_db};

    #[test]
    fn test_create_and_find() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let user_id = seed_user(conn);

        let tag = Tag::create(conn, user_id, "morning").unwrap();
        let found = Tag::find_by_id(conn, tag.id).unwrap();
        assert_eq!(found, Some(tag));
    }

    #[test]
    fn test_name_unique_per_user() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let user_id = seed_user(conn);

        Tag::create(conn, user_id, "morning").unwrap();
        assert!(Tag::create(conn, user_id, "morning").is_err());
    }

    #[test]
    fn test_find_for_user_sorted() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let user_id = seed_user(conn);

        Tag::create(conn, user_id, "weekly").unwrap();
        Tag::create(conn, user_id, "morning").unwrap();

        let tags = Tag::find_for_user(conn, user_id).unwrap();
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["morning", "weekly"]);
    }

    #[test]
    fn test_rename() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let user_id = seed_user(conn);

        let tag = Tag::create(conn, user_id, "morning").unwrap();
        assert!(Tag::rename(conn, tag.id, "evening").unwrap());

        let found = Tag::find_by_id(conn, tag.id).unwrap().unwrap();
        assert_eq!(found.name, "evening");
    }

    #[test]
    fn test_delete_detaches_habits() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let user_id = seed_user(conn);

        let tag = Tag::create(conn, user_id, "morning").unwrap();
        let habit = Habit::create(conn, user_id, "Run", None, None, None).unwrap();
        HabitTag::attach(conn, habit.id, tag.id).unwrap();

        assert!(Tag::delete(conn, tag.id).unwrap());

        // Habit survives with an empty tag set
        assert!(Habit::find_by_id(conn, habit.id).unwrap().is_some());
        assert!(HabitTag::tag_ids_for_habit(conn, habit.id).unwrap().is_empty());
    }
}
