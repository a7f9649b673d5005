//! Shared test utilities for Stride.
//!
//! This module provides common setup functions used across test modules.

#![cfg(test)]

use crate::db::{migrations, Database};
use crate::models::{Habit, User};
use rusqlite::Connection;
use tempfile::{tempdir, TempDir};

/// Create a temporary test database with migrations applied.
///
/// Returns a tuple of (Database, TempDir). The TempDir must be kept alive
/// for the duration of the test to prevent the database file from being deleted.
pub fn setup_test_db() -> (Database, TempDir) {
    let dir = tempdir().expect("Failed to create temp directory for test DB");
    let db_path = dir.path().join("test.db");
    let db = Database::open(&db_path).expect("Failed to open test database");
    migrations::run(db.connection()).expect("Failed to run migrations on test DB");
    (db, dir)
}

/// Insert a user and return its id.
pub fn seed_user(conn: &Connection) -> i64 {
    static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    User::create(conn, &format!("user{n}@example.com"), None)
        .expect("Failed to seed user")
        .id
}

/// Insert a habit with defaults and return its id.
pub fn seed_habit(conn: &Connection, user_id: i64, name: &str) -> i64 {
    Habit::create(conn, user_id, name, None, None, None)
        .expect("Failed to seed habit")
        .id
}
