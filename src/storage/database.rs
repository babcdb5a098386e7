//! `SQLite` database connection and operations.
//!
//! The database is stored at `~/.habitlog/habits.db` unless configured
//! otherwise, and contains:
//! - the `habits` registry table
//! - one log table per habit

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use crate::config::Paths;
use crate::error::HabitError;

use super::migrations;

/// Database connection wrapper.
///
/// The connection is opened once and closed when the wrapper is dropped.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at the default location.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open() -> Result<Self, HabitError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &Path) -> Result<Self, HabitError> {
        tracing::debug!(path = %path.display(), "opening database");

        let conn = Connection::open(path).map_err(|e| {
            HabitError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, HabitError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            HabitError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Run database migrations.
    fn migrate(&self) -> Result<(), HabitError> {
        migrations::run(&self.conn)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, HabitError> {
        migrations::get_version(&self.conn)
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Whether a table with this name exists (case-insensitive, like
    /// `SQLite` identifiers).
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be queried.
    pub fn table_exists(&self, name: &str) -> Result<bool, HabitError> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
                [name],
                |_| Ok(()),
            )
            .optional()
            .map_err(|e| HabitError::Database(format!("Failed to inspect schema: {e}")))?;

        Ok(found.is_some())
    }

    /// Names of all user tables, excluding `SQLite` internals.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be queried.
    pub fn user_tables(&self) -> Result<Vec<String>, HabitError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT name FROM sqlite_master
                 WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\'
                 ORDER BY name",
            )
            .map_err(|e| HabitError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| HabitError::Database(format!("Failed to list tables: {e}")))?;

        let mut tables = Vec::new();
        for row in rows {
            tables.push(row.map_err(|e| HabitError::Database(e.to_string()))?);
        }

        Ok(tables)
    }
}
