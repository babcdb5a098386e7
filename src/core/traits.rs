//! The seam between the interactive shell and the habit store.
//!
//! Every operation takes plain strings and integers and returns plain
//! values; presentation is left to the caller.

use crate::error::HabitError;
use crate::habits::{Habit, HabitLogs, HabitReport};

/// Habit registry and per-habit log operations.
///
/// Expected misses (unknown habit, unknown entry id, duplicate add) are
/// reported as `Ok(false)` or `Ok(None)`.
#[cfg_attr(test, mockall::automock)]
pub trait HabitRepository {
    /// Register a habit and create its empty log table.
    ///
    /// Returns `false` if the name is already registered.
    fn add_habit(&self, name: &str, unit: &str) -> Result<bool, HabitError>;

    /// Append an entry stamped with the current local time.
    ///
    /// Returns `false` if the habit is not registered.
    fn log_entry(&self, name: &str, quantity: i64) -> Result<bool, HabitError>;

    /// Remove a habit and drop its log table.
    fn delete_habit(&self, name: &str) -> Result<bool, HabitError>;

    /// Remove one log entry by id.
    fn delete_log_entry(&self, name: &str, id: i64) -> Result<bool, HabitError>;

    /// Rename a habit and/or change its unit. An empty string means
    /// "unspecified"; at least one of `new_name` and `new_unit` is required.
    ///
    /// `old_unit` is taken as given: an empty `new_unit` writes `old_unit`
    /// back, not the unit currently stored for `old_name`.
    fn update_habit(
        &self,
        old_name: &str,
        old_unit: &str,
        new_name: &str,
        new_unit: &str,
    ) -> Result<bool, HabitError>;

    /// Change the quantity of one log entry.
    fn update_log_entry(&self, name: &str, id: i64, quantity: i64) -> Result<bool, HabitError>;

    /// All habits in registration order.
    fn list_habits(&self) -> Result<Vec<Habit>, HabitError>;

    /// Every habit with its full log, in registration order.
    fn list_habits_with_logs(&self) -> Result<Vec<HabitLogs>, HabitError>;

    /// One habit's unit and log, or `None` if it is not registered.
    fn habit_logs(&self, name: &str) -> Result<Option<HabitLogs>, HabitError>;

    /// Aggregate statistics for one habit, or `None` if it is not registered.
    fn habit_report(&self, name: &str) -> Result<Option<HabitReport>, HabitError>;
}
