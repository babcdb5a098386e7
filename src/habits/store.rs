//! `SQLite`-backed habit store.
//!
//! Registry lookups compare names with `COLLATE NOCASE` because the log
//! table identifiers they map to are case-insensitive in `SQLite`.

use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use tracing::{debug, info, warn};

use super::report::{HabitReport, IntegrityReport};
use super::types::{Habit, HabitLogs, LogEntry};
use crate::core::{format_timestamp, now_timestamp, HabitRepository};
use crate::error::HabitError;
use crate::storage::identifier::{same_table, REGISTRY_TABLE};
use crate::storage::{quote_identifier, validate_habit_name, Database};

/// Owns the database connection and implements every habit operation.
pub struct HabitStore {
    db: Database,
}

impl HabitStore {
    /// Open the store at the default database location.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn new() -> Result<Self, HabitError> {
        Ok(Self::with_database(Database::open()?))
    }

    /// Create a store over an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Open the store at a specific database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open_at(path: &Path) -> Result<Self, HabitError> {
        Ok(Self::with_database(Database::open_at(path)?))
    }

    /// Open a store backed by an in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open_in_memory() -> Result<Self, HabitError> {
        Ok(Self::with_database(Database::open_in_memory()?))
    }

    /// The underlying database.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    fn begin(&self) -> Result<Transaction<'_>, HabitError> {
        self.db
            .connection()
            .unchecked_transaction()
            .map_err(|e| HabitError::Database(format!("Failed to begin transaction: {e}")))
    }

    /// Append an entry with an explicit timestamp.
    ///
    /// Returns `false` if the habit is not registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn log_entry_at(
        &self,
        name: &str,
        quantity: i64,
        at: NaiveDateTime,
    ) -> Result<bool, HabitError> {
        self.insert_entry(name, quantity, &format_timestamp(at))
    }

    fn insert_entry(&self, name: &str, quantity: i64, timestamp: &str) -> Result<bool, HabitError> {
        let conn = self.db.connection();
        let Some(habit) = find_habit(conn, name)? else {
            debug!(habit = name, "log entry for unregistered habit");
            return Ok(false);
        };

        let table = quote_identifier(&habit.name)?;
        conn.execute(
            &format!("INSERT INTO {table} (quantity, timestamp) VALUES (?1, ?2)"),
            params![quantity, timestamp],
        )
        .map_err(|e| HabitError::Database(format!("Failed to log {}: {e}", habit.name)))?;

        info!(habit = %habit.name, quantity, id = conn.last_insert_rowid(), "logged entry");
        Ok(true)
    }

    /// Compare the registry with the tables actually present.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be inspected.
    pub fn check_integrity(&self) -> Result<IntegrityReport, HabitError> {
        let conn = self.db.connection();
        let registered = list_registry(conn)?;
        let tables: Vec<String> = self
            .db
            .user_tables()?
            .into_iter()
            .filter(|t| !t.eq_ignore_ascii_case(REGISTRY_TABLE))
            .collect();

        let missing_tables = registered
            .iter()
            .filter(|h| !tables.iter().any(|t| same_table(t, &h.name)))
            .map(|h| h.name.clone())
            .collect();

        let mut orphaned_tables = Vec::new();
        for table in &tables {
            if registered.iter().any(|h| same_table(&h.name, table)) {
                continue;
            }
            if is_log_table(conn, table)? {
                orphaned_tables.push(table.clone());
            }
        }

        let report = IntegrityReport {
            missing_tables,
            orphaned_tables,
        };
        if !report.is_consistent() {
            warn!(
                missing = ?report.missing_tables,
                orphaned = ?report.orphaned_tables,
                "habit registry and log tables disagree"
            );
        }
        Ok(report)
    }
}

impl HabitRepository for HabitStore {
    fn add_habit(&self, name: &str, unit: &str) -> Result<bool, HabitError> {
        let table = quote_identifier(name)?;
        let tx = self.begin()?;

        if find_habit(&tx, name)?.is_some() {
            debug!(habit = name, "habit already registered");
            return Ok(false);
        }

        tx.execute(
            &format!(
                "CREATE TABLE {table} (id INTEGER PRIMARY KEY AUTOINCREMENT, quantity INTEGER, timestamp TEXT)"
            ),
            [],
        )
        .map_err(|e| HabitError::Database(format!("Failed to create log table {name}: {e}")))?;

        tx.execute(
            "INSERT INTO habits (name, unit) VALUES (?1, ?2)",
            params![name, unit],
        )
        .map_err(|e| HabitError::Database(format!("Failed to register habit {name}: {e}")))?;

        tx.commit()
            .map_err(|e| HabitError::Database(format!("Failed to commit new habit: {e}")))?;

        info!(habit = name, unit, "added habit");
        Ok(true)
    }

    fn log_entry(&self, name: &str, quantity: i64) -> Result<bool, HabitError> {
        self.insert_entry(name, quantity, &now_timestamp())
    }

    fn delete_habit(&self, name: &str) -> Result<bool, HabitError> {
        let tx = self.begin()?;
        let Some(habit) = find_habit(&tx, name)? else {
            return Ok(false);
        };
        let table = quote_identifier(&habit.name)?;

        tx.execute("DELETE FROM habits WHERE name = ?1", [&habit.name])
            .map_err(|e| HabitError::Database(format!("Failed to unregister {}: {e}", habit.name)))?;

        tx.execute_batch(&format!("DROP TABLE IF EXISTS {table}"))
            .map_err(|e| HabitError::Database(format!("Failed to drop log table {}: {e}", habit.name)))?;

        tx.commit()
            .map_err(|e| HabitError::Database(format!("Failed to commit habit deletion: {e}")))?;

        info!(habit = %habit.name, "deleted habit");
        Ok(true)
    }

    fn delete_log_entry(&self, name: &str, id: i64) -> Result<bool, HabitError> {
        let conn = self.db.connection();
        let Some(habit) = find_habit(conn, name)? else {
            return Ok(false);
        };
        let table = quote_identifier(&habit.name)?;

        let rows = conn
            .execute(&format!("DELETE FROM {table} WHERE id = ?1"), [id])
            .map_err(|e| HabitError::Database(format!("Failed to delete entry {id}: {e}")))?;

        if rows > 0 {
            info!(habit = %habit.name, id, "deleted log entry");
        }
        Ok(rows > 0)
    }

    fn update_habit(
        &self,
        old_name: &str,
        old_unit: &str,
        new_name: &str,
        new_unit: &str,
    ) -> Result<bool, HabitError> {
        if new_name.is_empty() && new_unit.is_empty() {
            return Err(HabitError::InvalidArgument(
                "At least one of the new habit name or unit must be provided".to_string(),
            ));
        }
        if !new_name.is_empty() {
            validate_habit_name(new_name)?;
        }

        let tx = self.begin()?;
        let Some(current) = find_habit(&tx, old_name)? else {
            return Ok(false);
        };

        let target_name = if new_name.is_empty() {
            current.name.as_str()
        } else {
            new_name
        };
        // An unspecified unit always keeps the old one, whether or not the
        // name changes.
        let target_unit = if new_unit.is_empty() { old_unit } else { new_unit };
        let renames_table = !same_table(&current.name, target_name);

        if renames_table && find_habit(&tx, target_name)?.is_some() {
            return Err(HabitError::AlreadyExists(target_name.to_string()));
        }

        tx.execute(
            "UPDATE habits SET name = ?1, unit = ?2 WHERE name = ?3",
            params![target_name, target_unit, current.name],
        )
        .map_err(|e| HabitError::Database(format!("Failed to update habit {}: {e}", current.name)))?;

        if renames_table {
            let from = quote_identifier(&current.name)?;
            let to = quote_identifier(target_name)?;
            tx.execute_batch(&format!("ALTER TABLE {from} RENAME TO {to}"))
                .map_err(|e| {
                    HabitError::Database(format!(
                        "Failed to rename log table {} to {target_name}: {e}",
                        current.name
                    ))
                })?;
        }

        tx.commit()
            .map_err(|e| HabitError::Database(format!("Failed to commit habit update: {e}")))?;

        info!(
            from = %current.name,
            to = target_name,
            unit = target_unit,
            renamed = renames_table,
            "updated habit"
        );
        Ok(true)
    }

    fn update_log_entry(&self, name: &str, id: i64, quantity: i64) -> Result<bool, HabitError> {
        let conn = self.db.connection();
        let Some(habit) = find_habit(conn, name)? else {
            return Ok(false);
        };
        let table = quote_identifier(&habit.name)?;

        let rows = conn
            .execute(
                &format!("UPDATE {table} SET quantity = ?1 WHERE id = ?2"),
                params![quantity, id],
            )
            .map_err(|e| HabitError::Database(format!("Failed to update entry {id}: {e}")))?;

        if rows > 0 {
            info!(habit = %habit.name, id, quantity, "updated log entry");
        }
        Ok(rows > 0)
    }

    fn list_habits(&self) -> Result<Vec<Habit>, HabitError> {
        list_registry(self.db.connection())
    }

    fn list_habits_with_logs(&self) -> Result<Vec<HabitLogs>, HabitError> {
        let conn = self.db.connection();
        let mut all = Vec::new();
        for habit in list_registry(conn)? {
            let entries = read_entries(conn, &habit.name)?;
            all.push(HabitLogs { habit, entries });
        }
        Ok(all)
    }

    fn habit_logs(&self, name: &str) -> Result<Option<HabitLogs>, HabitError> {
        let conn = self.db.connection();
        let Some(habit) = find_habit(conn, name)? else {
            return Ok(None);
        };
        let entries = read_entries(conn, &habit.name)?;
        Ok(Some(HabitLogs { habit, entries }))
    }

    fn habit_report(&self, name: &str) -> Result<Option<HabitReport>, HabitError> {
        let conn = self.db.connection();
        let Some(habit) = find_habit(conn, name)? else {
            return Ok(None);
        };
        let table = quote_identifier(&habit.name)?;

        // SQLite's SUM() fails on overflow; the total saturates instead.
        let total_quantity = read_entries(conn, &habit.name)?
            .iter()
            .fold(0_i64, |total, e| total.saturating_add(e.quantity));

        let (times, first_logged, last_logged): (i64, Option<String>, Option<String>) = conn
            .query_row(
                &format!("SELECT COUNT(*), MIN(timestamp), MAX(timestamp) FROM {table}"),
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .map_err(|e| HabitError::Database(format!("Failed to summarize {}: {e}", habit.name)))?;

        Ok(Some(HabitReport {
            habit,
            times,
            total_quantity,
            first_logged,
            last_logged,
        }))
    }
}

/// Look up a registered habit, returning the name as stored.
fn find_habit(conn: &Connection, name: &str) -> Result<Option<Habit>, HabitError> {
    conn.query_row(
        "SELECT name, unit FROM habits WHERE name = ?1 COLLATE NOCASE",
        [name],
        row_to_habit,
    )
    .optional()
    .map_err(|e| HabitError::Database(format!("Failed to look up habit {name}: {e}")))
}

fn list_registry(conn: &Connection) -> Result<Vec<Habit>, HabitError> {
    let mut stmt = conn
        .prepare("SELECT name, unit FROM habits ORDER BY rowid")
        .map_err(|e| HabitError::Database(format!("Failed to prepare query: {e}")))?;

    let rows = stmt
        .query_map([], row_to_habit)
        .map_err(|e| HabitError::Database(format!("Failed to query habits: {e}")))?;

    let mut habits = Vec::new();
    for row in rows {
        habits.push(row.map_err(|e| HabitError::Database(e.to_string()))?);
    }

    Ok(habits)
}

fn read_entries(conn: &Connection, name: &str) -> Result<Vec<LogEntry>, HabitError> {
    let table = quote_identifier(name)?;
    let mut stmt = conn
        .prepare(&format!(
            "SELECT id, quantity, timestamp FROM {table} ORDER BY id"
        ))
        .map_err(|e| HabitError::Database(format!("Failed to read log of {name}: {e}")))?;

    let rows = stmt
        .query_map([], row_to_entry)
        .map_err(|e| HabitError::Database(format!("Failed to query log of {name}: {e}")))?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(row.map_err(|e| HabitError::Database(e.to_string()))?);
    }

    Ok(entries)
}

/// Whether a table has the `(id, quantity, timestamp)` shape of a habit log.
fn is_log_table(conn: &Connection, table: &str) -> Result<bool, HabitError> {
    let mut stmt = conn
        .prepare("SELECT name FROM pragma_table_info(?1)")
        .map_err(|e| HabitError::Database(format!("Failed to prepare query: {e}")))?;

    let rows = stmt
        .query_map([table], |row| row.get::<_, String>(0))
        .map_err(|e| HabitError::Database(format!("Failed to inspect {table}: {e}")))?;

    let mut columns = Vec::new();
    for row in rows {
        columns.push(row.map_err(|e| HabitError::Database(e.to_string()))?);
    }

    Ok(columns.len() == 3
        && ["id", "quantity", "timestamp"]
            .iter()
            .all(|c| columns.iter().any(|col| col.eq_ignore_ascii_case(c))))
}

fn row_to_habit(row: &Row<'_>) -> Result<Habit, rusqlite::Error> {
    let name: String = row.get(0)?;
    let unit: Option<String> = row.get(1)?;
    Ok(Habit {
        name,
        unit: unit.unwrap_or_default(),
    })
}

fn row_to_entry(row: &Row<'_>) -> Result<LogEntry, rusqlite::Error> {
    let id: i64 = row.get(0)?;
    let quantity: Option<i64> = row.get(1)?;
    let timestamp: Option<String> = row.get(2)?;
    Ok(LogEntry {
        id,
        quantity: quantity.unwrap_or_default(),
        timestamp: timestamp.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_test_store() -> HabitStore {
        HabitStore::open_in_memory().unwrap()
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn quantities(store: &HabitStore, name: &str) -> Vec<(i64, i64)> {
        store
            .habit_logs(name)
            .unwrap()
            .unwrap()
            .entries
            .iter()
            .map(|e| (e.id, e.quantity))
            .collect()
    }

    #[test]
    fn test_add_habit_lists_it() {
        let store = create_test_store();

        assert!(store.add_habit("water", "ml").unwrap());

        let habits = store.list_habits().unwrap();
        assert_eq!(habits, vec![Habit::new("water", "ml")]);
        assert!(store.database().table_exists("water").unwrap());
    }

    #[test]
    fn test_add_habit_twice() {
        let store = create_test_store();

        assert!(store.add_habit("water", "ml").unwrap());
        assert!(!store.add_habit("water", "l").unwrap());

        let habits = store.list_habits().unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].unit, "ml");
    }

    #[test]
    fn test_add_habit_differing_only_in_case() {
        let store = create_test_store();

        assert!(store.add_habit("water", "ml").unwrap());
        assert!(!store.add_habit("Water", "ml").unwrap());
        assert_eq!(store.list_habits().unwrap().len(), 1);
    }

    #[test]
    fn test_add_habit_rejects_bad_identifier() {
        let store = create_test_store();

        let err = store
            .add_habit("water; DROP TABLE habits", "ml")
            .unwrap_err();
        assert!(matches!(err, HabitError::InvalidName { .. }));
        assert!(store.list_habits().unwrap().is_empty());
        assert!(store.database().table_exists("habits").unwrap());
    }

    #[test]
    fn test_habits_listed_in_insertion_order() {
        let store = create_test_store();
        for name in ["walk", "apples", "meditate"] {
            store.add_habit(name, "x").unwrap();
        }

        let names: Vec<_> = store
            .list_habits()
            .unwrap()
            .into_iter()
            .map(|h| h.name)
            .collect();
        assert_eq!(names, vec!["walk", "apples", "meditate"]);
    }

    #[test]
    fn test_log_entry_unregistered() {
        let store = create_test_store();

        assert!(!store.log_entry("water", 500).unwrap());
        assert!(store.list_habits().unwrap().is_empty());
        assert_eq!(store.database().user_tables().unwrap(), vec!["habits"]);
    }

    #[test]
    fn test_log_entry_single_row() {
        let store = create_test_store();
        store.add_habit("water", "ml").unwrap();

        assert!(store.log_entry("water", 500).unwrap());

        let logs = store.habit_logs("water").unwrap().unwrap();
        assert_eq!(logs.habit.unit, "ml");
        assert_eq!(logs.entries.len(), 1);
        assert_eq!(logs.entries[0].quantity, 500);
        assert!(!logs.entries[0].timestamp.is_empty());
        assert!(crate::core::parse_timestamp(&logs.entries[0].timestamp).is_some());
    }

    #[test]
    fn test_log_entry_at() {
        let store = create_test_store();
        store.add_habit("run", "km").unwrap();

        assert!(store.log_entry_at("run", 5, at(2, 7)).unwrap());

        let logs = store.habit_logs("run").unwrap().unwrap();
        assert_eq!(logs.entries[0].timestamp, "2024-05-02 07:00:00");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let store = create_test_store();
        store.add_habit("water", "ml").unwrap();

        assert!(store.log_entry("WATER", 250).unwrap());
        let logs = store.habit_logs("Water").unwrap().unwrap();
        assert_eq!(logs.habit.name, "water");
        assert_eq!(logs.entries.len(), 1);
    }

    #[test]
    fn test_delete_habit() {
        let store = create_test_store();
        store.add_habit("water", "ml").unwrap();
        store.log_entry("water", 500).unwrap();

        assert!(store.delete_habit("water").unwrap());

        assert!(store.list_habits().unwrap().is_empty());
        assert!(store.habit_logs("water").unwrap().is_none());
        assert!(!store.database().table_exists("water").unwrap());
    }

    #[test]
    fn test_delete_habit_unregistered() {
        let store = create_test_store();
        assert!(!store.delete_habit("water").unwrap());
    }

    #[test]
    fn test_readd_after_delete_starts_empty() {
        let store = create_test_store();
        store.add_habit("water", "ml").unwrap();
        store.log_entry("water", 500).unwrap();
        store.delete_habit("water").unwrap();

        assert!(store.add_habit("water", "l").unwrap());
        let logs = store.habit_logs("water").unwrap().unwrap();
        assert!(logs.entries.is_empty());
        assert_eq!(logs.habit.unit, "l");
    }

    #[test]
    fn test_delete_log_entry() {
        let store = create_test_store();
        store.add_habit("water", "ml").unwrap();
        store.log_entry("water", 100).unwrap();
        store.log_entry("water", 200).unwrap();

        assert!(store.delete_log_entry("water", 1).unwrap());
        assert_eq!(quantities(&store, "water"), vec![(2, 200)]);
    }

    #[test]
    fn test_delete_log_entry_missing_id() {
        let store = create_test_store();
        store.add_habit("water", "ml").unwrap();
        store.log_entry("water", 100).unwrap();
        store.log_entry("water", 200).unwrap();

        assert!(!store.delete_log_entry("water", 42).unwrap());
        assert_eq!(quantities(&store, "water"), vec![(1, 100), (2, 200)]);
    }

    #[test]
    fn test_delete_log_entry_unregistered() {
        let store = create_test_store();
        assert!(!store.delete_log_entry("water", 1).unwrap());
    }

    #[test]
    fn test_update_habit_requires_a_change() {
        let store = create_test_store();
        store.add_habit("run", "km").unwrap();

        let err = store.update_habit("run", "km", "", "").unwrap_err();
        assert!(matches!(err, HabitError::InvalidArgument(_)));
        assert_eq!(store.list_habits().unwrap(), vec![Habit::new("run", "km")]);
    }

    #[test]
    fn test_update_habit_rename_keeps_unit() {
        let store = create_test_store();
        store.add_habit("run", "km").unwrap();
        store.log_entry("run", 5).unwrap();

        assert!(store.update_habit("run", "km", "jog", "").unwrap());

        assert_eq!(store.list_habits().unwrap(), vec![Habit::new("jog", "km")]);
        assert!(store.habit_logs("run").unwrap().is_none());
        assert_eq!(quantities(&store, "jog"), vec![(1, 5)]);
        assert!(!store.database().table_exists("run").unwrap());
        assert!(store.database().table_exists("jog").unwrap());
    }

    #[test]
    fn test_update_habit_fills_unit_from_argument() {
        let store = create_test_store();
        store.add_habit("run", "km").unwrap();

        assert!(store.update_habit("run", "miles", "jog", "").unwrap());
        assert_eq!(store.list_habits().unwrap(), vec![Habit::new("jog", "miles")]);
    }

    #[test]
    fn test_update_habit_unit_only() {
        let store = create_test_store();
        store.add_habit("run", "km").unwrap();

        assert!(store.update_habit("run", "km", "", "mi").unwrap());

        assert_eq!(store.list_habits().unwrap(), vec![Habit::new("run", "mi")]);
        assert!(store.database().table_exists("run").unwrap());
    }

    #[test]
    fn test_update_habit_same_name_new_unit() {
        let store = create_test_store();
        store.add_habit("run", "km").unwrap();
        store.log_entry("run", 3).unwrap();

        assert!(store.update_habit("run", "km", "run", "mi").unwrap());

        assert_eq!(store.list_habits().unwrap(), vec![Habit::new("run", "mi")]);
        assert_eq!(quantities(&store, "run"), vec![(1, 3)]);
    }

    #[test]
    fn test_update_habit_case_only_rename() {
        let store = create_test_store();
        store.add_habit("run", "km").unwrap();
        store.log_entry("run", 3).unwrap();

        assert!(store.update_habit("run", "km", "Run", "").unwrap());

        assert_eq!(store.list_habits().unwrap(), vec![Habit::new("Run", "km")]);
        assert_eq!(quantities(&store, "Run"), vec![(1, 3)]);
        assert!(store.check_integrity().unwrap().is_consistent());
    }

    #[test]
    fn test_update_habit_unregistered() {
        let store = create_test_store();
        assert!(!store.update_habit("run", "km", "jog", "").unwrap());
        assert!(store.list_habits().unwrap().is_empty());
    }

    #[test]
    fn test_update_habit_onto_existing_name() {
        let store = create_test_store();
        store.add_habit("run", "km").unwrap();
        store.add_habit("jog", "km").unwrap();

        let err = store.update_habit("run", "km", "jog", "").unwrap_err();
        assert!(matches!(err, HabitError::AlreadyExists(_)));
        assert_eq!(
            store.list_habits().unwrap(),
            vec![Habit::new("run", "km"), Habit::new("jog", "km")]
        );
    }

    #[test]
    fn test_update_habit_rejects_bad_new_name() {
        let store = create_test_store();
        store.add_habit("run", "km").unwrap();

        let err = store.update_habit("run", "km", "run fast", "").unwrap_err();
        assert!(matches!(err, HabitError::InvalidName { .. }));
        assert_eq!(store.list_habits().unwrap(), vec![Habit::new("run", "km")]);
    }

    #[test]
    fn test_update_log_entry_round_trip() {
        let store = create_test_store();
        store.add_habit("pushups", "reps").unwrap();
        for quantity in [10, 20, 30] {
            store.log_entry("pushups", quantity).unwrap();
        }
        let before = store.habit_logs("pushups").unwrap().unwrap();

        assert!(store.update_log_entry("pushups", 2, 25).unwrap());

        let after = store.habit_logs("pushups").unwrap().unwrap();
        assert_eq!(quantities(&store, "pushups"), vec![(1, 10), (2, 25), (3, 30)]);
        assert_eq!(before.entries[0], after.entries[0]);
        assert_eq!(before.entries[2], after.entries[2]);
        assert_eq!(before.entries[1].timestamp, after.entries[1].timestamp);
    }

    #[test]
    fn test_update_log_entry_missing() {
        let store = create_test_store();
        store.add_habit("pushups", "reps").unwrap();

        assert!(!store.update_log_entry("pushups", 9, 25).unwrap());
        assert!(!store.update_log_entry("situps", 1, 25).unwrap());
    }

    #[test]
    fn test_ids_are_not_reused() {
        let store = create_test_store();
        store.add_habit("water", "ml").unwrap();
        store.log_entry("water", 1).unwrap();
        store.log_entry("water", 2).unwrap();
        store.delete_log_entry("water", 2).unwrap();
        store.log_entry("water", 3).unwrap();

        assert_eq!(quantities(&store, "water"), vec![(1, 1), (3, 3)]);
    }

    #[test]
    fn test_list_habits_with_logs() {
        let store = create_test_store();
        store.add_habit("water", "ml").unwrap();
        store.add_habit("run", "km").unwrap();
        store.log_entry("water", 250).unwrap();
        store.log_entry("water", 500).unwrap();

        let all = store.list_habits_with_logs().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].habit, Habit::new("water", "ml"));
        assert_eq!(all[0].entries.len(), 2);
        assert_eq!(all[1].habit, Habit::new("run", "km"));
        assert!(all[1].entries.is_empty());
    }

    #[test]
    fn test_list_habits_empty() {
        let store = create_test_store();
        assert!(store.list_habits().unwrap().is_empty());
        assert!(store.list_habits_with_logs().unwrap().is_empty());
    }

    #[test]
    fn test_habit_report() {
        let store = create_test_store();
        store.add_habit("run", "km").unwrap();
        store.log_entry_at("run", 5, at(3, 7)).unwrap();
        store.log_entry_at("run", 10, at(1, 7)).unwrap();
        store.log_entry_at("run", 3, at(9, 18)).unwrap();

        let report = store.habit_report("run").unwrap().unwrap();
        assert_eq!(report.times, 3);
        assert_eq!(report.total_quantity, 18);
        assert_eq!(report.first_logged.as_deref(), Some("2024-05-01 07:00:00"));
        assert_eq!(report.last_logged.as_deref(), Some("2024-05-09 18:00:00"));
    }

    #[test]
    fn test_extreme_quantities_saturate() {
        let store = create_test_store();
        store.add_habit("steps", "").unwrap();
        store.log_entry("steps", i64::MAX).unwrap();
        store.log_entry("steps", 1).unwrap();

        let logs = store.habit_logs("steps").unwrap().unwrap();
        assert_eq!(logs.total_quantity(), i64::MAX);
        assert!(crate::output::format_habit_logs_pretty(&logs).contains("Total:"));

        let report = store.habit_report("steps").unwrap().unwrap();
        assert_eq!(report.times, 2);
        assert_eq!(report.total_quantity, i64::MAX);
    }

    #[test]
    fn test_habit_report_empty_and_missing() {
        let store = create_test_store();
        store.add_habit("run", "km").unwrap();

        let report = store.habit_report("run").unwrap().unwrap();
        assert_eq!(report.times, 0);
        assert_eq!(report.total_quantity, 0);
        assert!(report.first_logged.is_none());

        assert!(store.habit_report("swim").unwrap().is_none());
    }

    #[test]
    fn test_registry_and_tables_stay_in_step() {
        let store = create_test_store();
        store.add_habit("water", "ml").unwrap();
        store.add_habit("run", "km").unwrap();
        store.update_habit("run", "km", "jog", "").unwrap();
        store.add_habit("read", "pages").unwrap();
        store.delete_habit("water").unwrap();

        assert!(store.check_integrity().unwrap().is_consistent());
        let mut tables = store.database().user_tables().unwrap();
        tables.retain(|t| t != "habits");
        assert_eq!(tables, vec!["jog", "read"]);
    }

    #[test]
    fn test_check_integrity_detects_mismatches() {
        let store = create_test_store();
        store.add_habit("water", "ml").unwrap();
        let conn = store.database().connection();
        conn.execute_batch(
            "INSERT INTO habits (name, unit) VALUES ('ghost', 'x');
             CREATE TABLE stray (id INTEGER PRIMARY KEY AUTOINCREMENT, quantity INTEGER, timestamp TEXT);
             CREATE TABLE notes (body TEXT);",
        )
        .unwrap();

        let report = store.check_integrity().unwrap();
        assert_eq!(report.missing_tables, vec!["ghost"]);
        assert_eq!(report.orphaned_tables, vec!["stray"]);
    }

    #[test]
    fn test_failed_add_leaves_no_registry_row() {
        let store = create_test_store();
        // A leftover table blocks creation; the registry insert must roll back
        store
            .database()
            .connection()
            .execute_batch("CREATE TABLE water (id INTEGER PRIMARY KEY)")
            .unwrap();

        assert!(store.add_habit("water", "ml").is_err());
        assert!(store.list_habits().unwrap().is_empty());
    }

    #[test]
    fn test_data_survives_reopen() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("habits.db");

        {
            let store = HabitStore::open_at(&path).unwrap();
            store.add_habit("water", "ml").unwrap();
            store.log_entry("water", 500).unwrap();
        }

        let store = HabitStore::open_at(&path).unwrap();
        assert_eq!(quantities(&store, "water"), vec![(1, 500)]);
    }
}
