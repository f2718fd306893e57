//! Database migrations for habitual.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use rusqlite::Connection;

use crate::error::HabitError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, HabitError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| HabitError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), HabitError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| HabitError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), HabitError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        tracing::debug!(version, "running migration");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), HabitError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(HabitError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: Initial schema.
///
/// Creates tables for:
/// - `habits`: one row per habit
/// - `completions`: completion timestamps, at most one per habit and day
fn migrate_v1(conn: &Connection) -> Result<(), HabitError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS habits (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            category TEXT NOT NULL,
            frequency TEXT NOT NULL,
            target_days INTEGER NOT NULL,
            color TEXT,
            icon TEXT,
            is_archived INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            created_epoch INTEGER NOT NULL,
            updated_at TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_habits_owner
        ON habits(user_id, is_archived, created_epoch);

        -- day is the calendar date in the offset the completion was recorded in
        CREATE TABLE IF NOT EXISTS completions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            habit_id TEXT NOT NULL REFERENCES habits(id) ON DELETE CASCADE,
            completed_at TEXT NOT NULL,
            day TEXT NOT NULL,
            UNIQUE(habit_id, day)
        );

        CREATE INDEX IF NOT EXISTS idx_completions_day
        ON completions(day);
        ",
    )
    .map_err(|e| HabitError::Database(format!("Migration v1 failed: {e}")))
}
