use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, params};

use crate::constants::DEFAULT_TRACKING_DAYS;

/// An account that owns habits, categories, and tags.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    /// Tracking window in days used when a habit has no override.
    pub default_tracking_days: i64,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn create(conn: &Connection, email: &str, name: Option<&str>) -> Result<Self> {
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO users (email, name, default_tracking_days, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![email, name, DEFAULT_TRACKING_DAYS, created_at],
        )?;
        Ok(Self {
            id: conn.last_insert_rowid(),
            email: email.to_string(),
            name: name.map(|s| s.to_string()),
            default_tracking_days: DEFAULT_TRACKING_DAYS,
            created_at,
        })
    }

    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, email, name, default_tracking_days, created_at
             FROM users WHERE id = ?1",
        )?;
        let mut rows = stmt.query(params![id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(Self {
                id: row.get(0)?,
                email: row.get(1)?,
                name: row.get(2)?,
                default_tracking_days: row.get(3)?,
                created_at: row.get(4)?,
            }))
        } else {
            Ok(None)
        }
    }

    pub fn find_by_email(conn: &Connection, email: &str) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, email, name, default_tracking_days, created_at
             FROM users WHERE email = ?1",
        )?;
        let mut rows = stmt.query(params![email])?;

        if let Some(row) = rows.next()? {
            Ok(Some(Self {
                id: row.get(0)?,
                email: row.get(1)?,
                name: row.get(2)?,
                default_tracking_days: row.get(3)?,
                created_at: row.get(4)?,
            }))
        } else {
            Ok(None)
        }
    }

    /// Persist a new default tracking window. Range checks happen in the
    /// api layer before this is called.
    pub fn set_default_tracking_days(conn: &Connection, id: i64, days: i64) -> Result<bool> {
        let rows_affected = conn.execute(
            "UPDATE users SET default_tracking_days = ?1 WHERE id = ?2",
            params![days, id],
        )?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[test]
    fn test_create_user() {
        let (db, _dir) = setup_test_db();
        let user = User::create(db.connection(), "ada@example.com", Some("Ada")).unwrap();

        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.default_tracking_days, 7);

        let found = User::find_by_id(db.connection(), user.id).unwrap();
        assert_eq!(found, Some(user));
    }

    #[test]
    fn test_find_by_email() {
        let (db, _dir) = setup_test_db();
        let user = User::create(db.connection(), "ada@example.com", None).unwrap();

        let found = User::find_by_email(db.connection(), "ada@example.com").unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));

        let missing = User::find_by_email(db.connection(), "nobody@example.com").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_set_default_tracking_days() {
        let (db, _dir) = setup_test_db();
        let user = User::create(db.connection(), "ada@example.com", None).unwrap();

        let updated = User::set_default_tracking_days(db.connection(), user.id, 14).unwrap();
        assert!(updated);

        let found = User::find_by_id(db.connection(), user.id).unwrap().unwrap();
        assert_eq!(found.default_tracking_days, 14);

        let missing = User::set_default_tracking_days(db.connection(), 99999, 14).unwrap();
        assert!(!missing);
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let (db, _dir) = setup_test_db();
        User::create(db.connection(), "ada@example.com", None).unwrap();

        let result = User::create(db.connection(), "ada@example.com", None);
        assert!(result.is_err());
    }
}
