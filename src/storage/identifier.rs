//! Habit names used as SQL identifiers.
//!
//! Every habit owns a log table named after it. This module is the only
//! place where a habit name is turned into SQL text: names are validated
//! against a strict pattern and then quoted.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::HabitError;

/// Maximum length of a habit name.
pub const MAX_NAME_LEN: usize = 64;

/// Name of the registry table. No habit may shadow it.
pub const REGISTRY_TABLE: &str = "habits";

static IDENTIFIER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$")
        .unwrap_or_else(|e| panic!("Invalid identifier regex: {e}"))
});

/// Check that `name` can be used as a log table identifier.
///
/// # Errors
///
/// Returns `HabitError::InvalidName` if the name is empty, too long, uses
/// characters outside `[A-Za-z0-9_]`, starts with a digit, or collides
/// with the registry table or `SQLite`'s internal tables.
pub fn validate_habit_name(name: &str) -> Result<(), HabitError> {
    if name.is_empty() {
        return Err(HabitError::invalid_name(name, "name is empty"));
    }

    if name.len() > MAX_NAME_LEN {
        return Err(HabitError::invalid_name(
            name,
            format!("name is longer than {MAX_NAME_LEN} characters"),
        ));
    }

    if !IDENTIFIER_PATTERN.is_match(name) {
        return Err(HabitError::invalid_name(
            name,
            "use letters, digits and underscores, not starting with a digit",
        ));
    }

    if name.eq_ignore_ascii_case(REGISTRY_TABLE) {
        return Err(HabitError::invalid_name(name, "name is reserved"));
    }

    if name.to_ascii_lowercase().starts_with("sqlite_") {
        return Err(HabitError::invalid_name(
            name,
            "names starting with 'sqlite_' are reserved",
        ));
    }

    Ok(())
}

/// Validate `name` and return it as a quoted SQL identifier.
///
/// # Errors
///
/// Returns `HabitError::InvalidName` if the name fails validation.
pub fn quote_identifier(name: &str) -> Result<String, HabitError> {
    validate_habit_name(name)?;
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

/// Whether two habit names refer to the same table.
#[must_use]
pub fn same_table(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
