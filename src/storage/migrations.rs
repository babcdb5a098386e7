//! Database migrations for habitlog.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.
//!
//! Only the registry table is managed here. Per-habit log tables are
//! created and dropped by the habit store.

use rusqlite::Connection;

use crate::error::HabitError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, HabitError> {
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| HabitError::Database(format!("Failed to get schema version: {e}")))?;

    Ok(version)
}

/// Set the schema version in the database.
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

/// Run a specific migration.
fn run_migration(conn: &Connection, version: i32) -> Result<(), HabitError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(HabitError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: habit registry.
///
/// `IF NOT EXISTS` keeps files written by earlier versions of the tracker
/// (which never set `user_version`) usable as-is.
fn migrate_v1(conn: &Connection) -> Result<(), HabitError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS habits (
            name TEXT PRIMARY KEY,
            unit TEXT
        );
        ",
    )
    .map_err(|e| HabitError::Database(format!("Migration v1 failed: {e}")))
}
